//! Simulated servo driver

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;

use super::{ServoDriver, ServoError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of output channels, matching the PCA9685.
pub const NUM_SIM_CHANNELS: usize = 16;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A servo driver with no hardware behind it.
///
/// Keeps the last pulse written to each channel so the output can be inspected.
#[derive(Debug, Default, Clone)]
pub struct SimDriver {
    pulses: [Option<u16>; NUM_SIM_CHANNELS],

    num_writes: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pulse written to a channel, `None` if it was never written.
    pub fn pulse(&self, channel: u8) -> Option<u16> {
        self.pulses.get(channel as usize).copied().flatten()
    }

    /// Total number of writes made to the driver.
    pub fn num_writes(&self) -> usize {
        self.num_writes
    }
}

impl ServoDriver for SimDriver {
    fn set_pulse(&mut self, channel: u8, pulse: u16) -> Result<(), ServoError> {
        let slot = self
            .pulses
            .get_mut(channel as usize)
            .ok_or(ServoError::InvalidChannel(channel))?;

        *slot = Some(pulse);
        self.num_writes += 1;

        trace!("sim: channel {:>2} <- {}", channel, pulse);

        Ok(())
    }
}
