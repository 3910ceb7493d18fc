//! [`ServoDriver`] implementation for the PCA9685 driver

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use embedded_hal::blocking::i2c::{Write, WriteRead};
use log::debug;
use pwm_pca9685::{Address, Channel, Pca9685};

use super::{ServoDriver, ServoError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const MAX_PWM: u16 = 4096;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open and configure a PCA9685 board.
///
/// The prescaler sets the output frequency, `121` gives the 50 Hz expected by hobby servos.
pub fn init<I2C, E>(i2c: I2C, address: u8, prescale: u8) -> Result<Pca9685<I2C>, ServoError>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    let mut pwm = Pca9685::new(i2c, Address::from(address)).map_err(map_err)?;

    pwm.set_prescale(prescale).map_err(map_err)?;
    pwm.enable().map_err(map_err)?;

    debug!(
        "PCA9685 at {:#04x} enabled with prescale {}",
        address, prescale
    );

    Ok(pwm)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<I2C, E> ServoDriver for Pca9685<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
{
    fn set_pulse(&mut self, channel: u8, pulse: u16) -> Result<(), ServoError> {
        if pulse >= MAX_PWM {
            return Err(ServoError::InvalidPulse(pulse));
        }

        self.set_channel_on_off(to_channel(channel)?, 0, pulse)
            .map_err(map_err)
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn to_channel(port: u8) -> Result<Channel, ServoError> {
    Ok(match port {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        15 => Channel::C15,
        p => return Err(ServoError::InvalidChannel(p)),
    })
}

fn map_err<E>(e: pwm_pca9685::Error<E>) -> ServoError {
    match e {
        pwm_pca9685::Error::I2C(_) => ServoError::I2c,
        pwm_pca9685::Error::InvalidInputData => ServoError::InvalidPulse(MAX_PWM),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_channel() {
        assert!(matches!(to_channel(0), Ok(Channel::C0)));
        assert!(matches!(to_channel(15), Ok(Channel::C15)));
        assert_eq!(to_channel(16).err(), Some(ServoError::InvalidChannel(16)));
    }
}
