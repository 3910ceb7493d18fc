//! Blocking delay provider for hosted targets

use embedded_hal::blocking::delay::DelayMs;
use std::{thread, time::Duration};

/// Delay which puts the calling thread to sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayMs<u32> for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(ms as u64));
    }
}
