//! # Sequence Executor
//!
//! Runs a sequence from the library to completion, one waypoint at a time.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use embedded_hal::blocking::delay::DelayMs;
use log::info;

use crate::{
    data_store::DataStore,
    interp,
    sequences::{SequenceId, Waypoint},
    servo_ctrl::ServoDriver,
    ArmError,
};

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run a sequence.
///
/// Each waypoint is executed as a smooth move followed by the waypoint's settle time, and
/// `checkpoint` is called after every interpolation step and settle. Returns once the final settle
/// time has elapsed, or at the first driver fault. There's no rollback, a faulted sequence leaves
/// the arm wherever it got to.
pub fn run<D, T>(
    ds: &mut DataStore<D, T>,
    id: SequenceId,
    checkpoint: &mut dyn FnMut(),
) -> Result<(), ArmError>
where
    D: ServoDriver,
    T: DelayMs<u32>,
{
    let waypoints = ds.library.get(id).waypoints;

    info!("Running {} sequence ({} steps)", id, waypoints.len());

    for (i, wp) in waypoints.iter().enumerate() {
        info!("{}", step_narration(id, i, waypoints.len(), wp));

        interp::smooth_move(ds, wp.joint, wp.target_deg, checkpoint)?;

        ds.delay.delay_ms(wp.settle_ms);
        checkpoint();
    }

    info!("{} sequence complete", id);

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Describe a step with the angle the joint will actually be driven to.
fn step_narration(id: SequenceId, index: usize, num_steps: usize, wp: &Waypoint) -> String {
    format!(
        "  {} step {}/{}: {} -> {} deg",
        id,
        index + 1,
        num_steps,
        wp.joint,
        interp::clamp_angle(wp.target_deg)
    )
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
