//! # Arm Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::LevelFilter;
use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct ArmExecParams {

    /// Endpoint the command socket binds to
    pub cmd_endpoint: String,

    /// Which servo driver to use
    pub driver: DriverKind,

    /// 7-bit I2C address of the PCA9685 board
    #[serde(default = "default_i2c_address")]
    pub i2c_address: u8,

    /// PCA9685 prescaler, sets the PWM frequency
    #[serde(default = "default_pwm_prescale")]
    pub pwm_prescale: u8,

    /// Minimum level of log messages
    #[serde(default = "default_log_level")]
    pub log_level: LevelFilter,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Available servo drivers.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// PCA9685 board on the host's I2C bus
    Pca9685,

    /// No hardware, see [`crate::servo_ctrl::SimDriver`]
    Sim,
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn default_i2c_address() -> u8 {
    0x40
}

fn default_pwm_prescale() -> u8 {
    121
}

fn default_log_level() -> LevelFilter {
    LevelFilter::Info
}
