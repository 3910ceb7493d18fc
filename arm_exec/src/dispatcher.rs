//! # Command Dispatcher
//!
//! Entry point of the controller. Each incoming message is parsed into a telecommand and either
//! answered directly (status, map) or turned into a sequence run. Only one sequence may run at a
//! time: messages which arrive while one is running are answered as busy and dropped.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::tc::{ArmTc, TcParseError};
use embedded_hal::blocking::delay::DelayMs;
use log::{error, info, warn};

use crate::{data_store::DataStore, executor, sequences::SequenceId, servo_ctrl::ServoDriver};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The dispatcher's view of the command transport.
pub trait Link {
    /// Send the reply to the message currently being handled.
    fn reply(&mut self, text: &str);

    /// Return a message which has arrived since the last call, without waiting.
    fn poll(&mut self) -> Option<String>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Execution state of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Ready to accept a command
    Idle,

    /// Running the given sequence
    Busy(SequenceId),
}

/// What the dispatcher did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The message was empty
    Ignored,

    /// The sequence ran to completion
    Completed(SequenceId),

    /// The sequence stopped on a driver fault
    Faulted(SequenceId, String),

    /// Joint status dump
    Status(String),

    /// Joint map dump
    Map(String),

    /// The message wasn't a known command
    Unrecognised(String),

    /// A sequence was running, the message was dropped
    Busy,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Command dispatcher, owns the controller's data store.
pub struct Dispatcher<D, T> {
    ds: DataStore<D, T>,

    state: DispatchState,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<D, T> Dispatcher<D, T>
where
    D: ServoDriver,
    T: DelayMs<u32>,
{
    pub fn new(ds: DataStore<D, T>) -> Self {
        Self {
            ds,
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn data_store(&self) -> &DataStore<D, T> {
        &self.ds
    }

    /// Handle one message from the link.
    ///
    /// Exactly one reply is sent on `link` for every message, empty messages get an empty reply.
    /// Sequence commands are acknowledged before the sequence starts, and while it runs any
    /// further messages on the link are answered as busy.
    pub fn dispatch<L>(&mut self, raw: &str, link: &mut L) -> Outcome
    where
        L: Link + ?Sized,
    {
        let parsed = ArmTc::parse(raw);

        match (self.state, parsed) {
            (_, Ok(None)) => {
                link.reply("");
                Outcome::Ignored
            }
            (DispatchState::Busy(running), _) => reject_busy(running, raw, link),
            (DispatchState::Idle, Err(TcParseError::Unrecognised(token))) => {
                warn!("Unrecognised command \"{}\"", token);
                link.reply(&format!("ERR unrecognised command: {}", token));
                Outcome::Unrecognised(token)
            }
            (DispatchState::Idle, Ok(Some(tc))) => match tc {
                ArmTc::Approach => self.run_sequence(SequenceId::Approach, link),
                ArmTc::Grab => self.run_sequence(SequenceId::Grab, link),
                ArmTc::Drop => self.run_sequence(SequenceId::Drop, link),
                ArmTc::Release => self.run_sequence(SequenceId::Release, link),
                ArmTc::Reset => self.run_sequence(SequenceId::Home, link),
                ArmTc::Status => {
                    let text = self.ds.positions.status_text(&self.ds.registry);
                    log_lines(&text);
                    link.reply(&text);
                    Outcome::Status(text)
                }
                ArmTc::Map => {
                    let text = self.ds.registry.map_text();
                    log_lines(&text);
                    link.reply(&text);
                    Outcome::Map(text)
                }
            },
        }
    }

    fn run_sequence<L>(&mut self, id: SequenceId, link: &mut L) -> Outcome
    where
        L: Link + ?Sized,
    {
        self.state = DispatchState::Busy(id);
        info!("Command accepted, starting {}", id);
        link.reply(&format!("OK {}", id));

        let result = {
            let mut checkpoint = || {
                while let Some(raw) = link.poll() {
                    if raw.trim().is_empty() {
                        link.reply("");
                    } else {
                        reject_busy(id, &raw, &mut *link);
                    }
                }
            };

            executor::run(&mut self.ds, id, &mut checkpoint)
        };

        // A fault returns the dispatcher to idle as well, so that the arm can still be reset
        self.state = DispatchState::Idle;

        match result {
            Ok(()) => Outcome::Completed(id),
            Err(e) => {
                error!("{} sequence aborted: {}", id, e);
                Outcome::Faulted(id, e.to_string())
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn reject_busy<L>(running: SequenceId, raw: &str, link: &mut L) -> Outcome
where
    L: Link + ?Sized,
{
    warn!("Busy running {}, ignored \"{}\"", running, raw.trim());
    link.reply("BUSY");
    Outcome::Busy
}

fn log_lines(text: &str) {
    for line in text.lines() {
        info!("{}", line);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
