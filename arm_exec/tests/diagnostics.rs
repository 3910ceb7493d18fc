//! Diagnostic output of the dispatcher.
//!
//! Installs a global logger, so lives in its own test binary with a single test.

mod common;

use arm_lib::dispatcher::{DispatchState, Outcome};
use common::{homed_dispatcher, RecLink};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.0.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture(Mutex::new(Vec::new()));

fn take_records() -> Vec<(Level, String)> {
    std::mem::take(&mut *CAPTURE.0.lock().unwrap())
}

#[test]
fn test_diagnostics() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut disp = homed_dispatcher();
    let mut link = RecLink::default();
    let before = disp.data_store().positions;
    take_records();

    // Unknown command: one line, nothing changes
    assert_eq!(disp.dispatch("FOO", &mut link), Outcome::Unrecognised("FOO".into()));
    let records = take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("FOO"));
    assert_eq!(disp.data_store().positions, before);
    assert_eq!(disp.state(), DispatchState::Idle);

    // Empty command: silent
    assert_eq!(disp.dispatch("   ", &mut link), Outcome::Ignored);
    assert!(take_records().is_empty());

    // Status: header and one line per joint
    disp.dispatch("STATUS", &mut link);
    let records = take_records();
    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|(l, _)| *l == Level::Info));

    // Busy drop is reported as a warning
    link.pending.push("BTN_A".into());
    disp.dispatch("RESET", &mut link);
    let records = take_records();
    assert!(records
        .iter()
        .any(|(l, m)| *l == Level::Warn && m.contains("Busy running Home")));
}
