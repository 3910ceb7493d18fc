//! # Data Store
//!
//! Everything the controller mutates or looks up while running a command, owned by the
//! dispatcher and lent to the executor and interpolator.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use embedded_hal::blocking::delay::DelayMs;
use log::info;

use crate::{
    interp,
    joints::JointRegistry,
    positions::PositionStore,
    sequences::SequenceLibrary,
    servo_ctrl::ServoDriver,
    ArmError,
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Controller data store.
pub struct DataStore<D, T> {
    pub registry: JointRegistry,

    pub positions: PositionStore,

    pub library: SequenceLibrary,

    /// Servo driver board the joints are wired to
    pub driver: D,

    /// Blocking delay used for interpolation steps and settle times
    pub delay: T,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<D, T> DataStore<D, T>
where
    D: ServoDriver,
    T: DelayMs<u32>,
{
    /// Create a new data store.
    ///
    /// The position store starts at its startup default, call [`DataStore::home`] before using
    /// the positions for anything.
    pub fn new(driver: D, delay: T) -> Self {
        Self {
            registry: JointRegistry::new(),
            positions: PositionStore::new(),
            library: SequenceLibrary::new(),
            driver,
            delay,
        }
    }

    /// Send every joint straight to its home angle.
    ///
    /// Used once at power up, when the real servo positions are unknown.
    pub fn home(&mut self) -> Result<(), ArmError> {
        info!("Moving all joints to their home angles");

        let targets: Vec<_> = self
            .registry
            .iter()
            .map(|j| (j.id, j.home_deg))
            .collect();

        for (joint, home_deg) in targets {
            interp::instant_move(self, joint, home_deg as i32)?;
        }

        Ok(())
    }
}
