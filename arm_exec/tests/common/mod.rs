//! Test doubles shared by the integration tests

#![allow(dead_code)]

use arm_lib::{
    data_store::DataStore,
    dispatcher::{Dispatcher, Link},
    servo_ctrl::{ServoDriver, ServoError, SimDriver},
};
use embedded_hal::blocking::delay::DelayMs;

/// Delay which records the requested times without sleeping.
#[derive(Default)]
pub struct RecDelay(pub Vec<u32>);

impl DelayMs<u32> for RecDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.push(ms);
    }
}

/// Link which collects replies and hands out queued messages one per poll.
#[derive(Default)]
pub struct RecLink {
    pub pending: Vec<String>,
    pub replies: Vec<String>,
}

impl Link for RecLink {
    fn reply(&mut self, text: &str) {
        self.replies.push(text.to_string());
    }

    fn poll(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

/// Driver which fails every write to one channel.
pub struct BrokenChannel {
    pub sim: SimDriver,
    pub channel: u8,
}

impl ServoDriver for BrokenChannel {
    fn set_pulse(&mut self, channel: u8, pulse: u16) -> Result<(), ServoError> {
        if channel == self.channel {
            return Err(ServoError::I2c);
        }
        self.sim.set_pulse(channel, pulse)
    }
}

/// A dispatcher in the state the executable leaves it after start up.
pub fn homed_dispatcher() -> Dispatcher<SimDriver, RecDelay> {
    let mut ds = DataStore::new(SimDriver::new(), RecDelay::default());
    ds.home().unwrap();
    Dispatcher::new(ds)
}
