//! # Arm sequencing library.
//!
//! Turns single telecommands into ordered, clamped, joint-by-joint trajectories for a six joint
//! arm driven through a servo driver board.
//!
//! Control flows from the [`dispatcher`] through the [`executor`] and [`interp`] down to a
//! [`servo_ctrl::ServoDriver`], all working on the controller's [`data_store::DataStore`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Controller state shared by the dispatcher, executor, and interpolator
pub mod data_store;

/// Blocking delay for hosted targets
pub mod delay;

/// Command dispatcher - entry point for telecommands
pub mod dispatcher;

/// Sequence executor - runs a sequence to completion
pub mod executor;

/// Motion interpolator - moves one joint to a target angle
pub mod interp;

/// Joint registry - names, ports, and home angles of the joints
pub mod joints;

/// Parameters for the arm executable
pub mod params;

/// Position store - last commanded angle of every joint
pub mod positions;

/// The fixed motion sequences
pub mod sequences;

/// Driver used to control servos.
pub mod servo_ctrl;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use joints::JointId;
use servo_ctrl::ServoError;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur while moving the arm.
#[derive(Debug, thiserror::Error)]
pub enum ArmError {
    #[error("Servo fault on the {joint} joint: {source}")]
    Servo {
        joint: JointId,
        source: ServoError,
    },
}
