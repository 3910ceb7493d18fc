//! # Servo Controller Module
//!
//! This module provides a unified servo control interface which can abstract over different types
//! of servo driver boards.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ServoDriver`] implementation for the Adafruit PCA9685 16 channel servo driver board.
pub mod pca9685;

/// Simulated [`ServoDriver`] for running without a driver board.
pub mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use sim::SimDriver;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for accessing servo driver boards.
pub trait ServoDriver {
    /// Set the pulse width output on a channel.
    ///
    /// ## Arguments
    /// - `channel` - The port on the board to drive
    /// - `pulse` - The pulse width in board ticks
    ///
    /// Only schedules the output change, does not wait for the servo to move.
    fn set_pulse(&mut self, channel: u8, pulse: u16) -> Result<(), ServoError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServoError {
    #[error("An I2C error occured")]
    I2c,

    #[error("Channel {0} does not exist on the driver board")]
    InvalidChannel(u8),

    #[error("Pulse width {0} is out of the board's range")]
    InvalidPulse(u16),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<D> ServoDriver for Box<D>
where
    D: ServoDriver + ?Sized,
{
    fn set_pulse(&mut self, channel: u8, pulse: u16) -> Result<(), ServoError> {
        (**self).set_pulse(channel, pulse)
    }
}
