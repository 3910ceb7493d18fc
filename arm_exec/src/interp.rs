//! # Motion Interpolator
//!
//! Moves a single joint to a target angle. Targets are saturated to the servo's range rather than
//! rejected, and every angle written to the driver is recorded in the position store.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use embedded_hal::blocking::delay::DelayMs;
use log::{debug, trace};

use crate::{data_store::DataStore, joints::JointId, servo_ctrl::ServoDriver, ArmError};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Lowest commandable angle.
///
/// Units: degrees
pub const MIN_ANGLE_DEG: u8 = 0;

/// Highest commandable angle.
///
/// Units: degrees
pub const MAX_ANGLE_DEG: u8 = 180;

/// Pulse width at [`MIN_ANGLE_DEG`].
pub const PULSE_MIN: u16 = 150;

/// Pulse width at [`MAX_ANGLE_DEG`].
pub const PULSE_MAX: u16 = 600;

/// Pause between each one degree step of a smooth move.
///
/// Units: milliseconds
pub const STEP_DELAY_MS: u32 = 15;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Saturate a requested angle to the commandable range.
pub fn clamp_angle(angle_deg: i32) -> u8 {
    angle_deg.clamp(MIN_ANGLE_DEG as i32, MAX_ANGLE_DEG as i32) as u8
}

/// Linearly map a (clamped) angle onto the driver's pulse range.
pub fn angle_to_pulse(angle_deg: u8) -> u16 {
    // 180 * 450 doesn't fit in a u16
    let angle_deg = angle_deg.min(MAX_ANGLE_DEG) as u32;
    let span = (PULSE_MAX - PULSE_MIN) as u32;

    (PULSE_MIN as u32 + angle_deg * span / MAX_ANGLE_DEG as u32) as u16
}

/// Move a joint to the target in a single write.
///
/// Returns the clamped angle which was commanded.
pub fn instant_move<D, T>(
    ds: &mut DataStore<D, T>,
    joint: JointId,
    target_deg: i32,
) -> Result<u8, ArmError>
where
    D: ServoDriver,
    T: DelayMs<u32>,
{
    let target = clamp_angle(target_deg);
    let previous = ds.positions.get(joint);

    let pulse = write_angle(ds, joint, target)?;
    ds.positions.set(joint, target);

    debug!(
        "{} {} -> {} deg (port {}, pulse {})",
        joint,
        previous,
        target,
        ds.registry.joint(joint).channel,
        pulse
    );

    Ok(target)
}

/// Move a joint to the target one degree at a time.
///
/// Every angle from the current one to the target (both included) is written in order, with
/// [`STEP_DELAY_MS`] between writes and a call to `checkpoint` after each pause. If the joint is
/// already at the target nothing is written. Blocks until the last step has been written.
///
/// If the driver fails part way through, the position store keeps the last angle that was written
/// successfully and the error is returned.
///
/// Returns the clamped angle which was commanded.
pub fn smooth_move<D, T>(
    ds: &mut DataStore<D, T>,
    joint: JointId,
    target_deg: i32,
    checkpoint: &mut dyn FnMut(),
) -> Result<u8, ArmError>
where
    D: ServoDriver,
    T: DelayMs<u32>,
{
    let target = clamp_angle(target_deg);
    let start = ds.positions.get(joint);

    if start == target {
        debug!("{} already at {} deg", joint, target);
        return Ok(target);
    }

    let mut working = start;
    let mut pulse = write_or_hold(ds, joint, working, start)?;

    while working != target {
        ds.delay.delay_ms(STEP_DELAY_MS);
        checkpoint();

        let next = if target > working { working + 1 } else { working - 1 };
        pulse = write_or_hold(ds, joint, next, working)?;
        working = next;
    }

    ds.positions.set(joint, target);

    debug!(
        "{} {} -> {} deg (port {}, pulse {})",
        joint,
        start,
        target,
        ds.registry.joint(joint).channel,
        pulse
    );

    Ok(target)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn write_angle<D, T>(ds: &mut DataStore<D, T>, joint: JointId, angle: u8) -> Result<u16, ArmError>
where
    D: ServoDriver,
{
    let channel = ds.registry.joint(joint).channel;
    let pulse = angle_to_pulse(angle);

    trace!("{} port {} <- {} ({} deg)", joint, channel, pulse, angle);

    ds.driver
        .set_pulse(channel, pulse)
        .map_err(|source| ArmError::Servo { joint, source })?;

    Ok(pulse)
}

/// Write an angle, recording `last_ok` as the joint's position if the write fails.
fn write_or_hold<D, T>(
    ds: &mut DataStore<D, T>,
    joint: JointId,
    angle: u8,
    last_ok: u8,
) -> Result<u16, ArmError>
where
    D: ServoDriver,
{
    write_angle(ds, joint, angle).map_err(|e| {
        ds.positions.set(joint, last_ok);
        e
    })
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::servo_ctrl::ServoError;

    /// Driver recording every write, optionally failing after a number of writes.
    #[derive(Default)]
    struct RecDriver {
        writes: Vec<(u8, u16)>,
        fail_after: Option<usize>,
    }

    impl ServoDriver for RecDriver {
        fn set_pulse(&mut self, channel: u8, pulse: u16) -> Result<(), ServoError> {
            if let Some(n) = self.fail_after {
                if self.writes.len() >= n {
                    return Err(ServoError::I2c);
                }
            }
            self.writes.push((channel, pulse));
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecDelay(Vec<u32>);

    impl DelayMs<u32> for RecDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms);
        }
    }

    fn store() -> DataStore<RecDriver, RecDelay> {
        DataStore::new(RecDriver::default(), RecDelay::default())
    }

    #[test]
    fn test_clamp_angle() {
        assert_eq!(clamp_angle(-20), 0);
        assert_eq!(clamp_angle(0), 0);
        assert_eq!(clamp_angle(97), 97);
        assert_eq!(clamp_angle(180), 180);
        assert_eq!(clamp_angle(181), 180);
        assert_eq!(clamp_angle(i32::MAX), 180);
    }

    #[test]
    fn test_angle_to_pulse() {
        assert_eq!(angle_to_pulse(0), 150);
        assert_eq!(angle_to_pulse(90), 375);
        assert_eq!(angle_to_pulse(180), 600);
        // 17 * 450 / 180 = 42.5, truncated
        assert_eq!(angle_to_pulse(17), 192);
    }

    #[test]
    fn test_angle_to_pulse_upper_range() {
        // Products above u16::MAX start at 146 deg
        assert_eq!(angle_to_pulse(145), 512);
        assert_eq!(angle_to_pulse(146), 515);
        assert_eq!(angle_to_pulse(179), 597);

        let mut last = angle_to_pulse(0);
        for a in 1..=MAX_ANGLE_DEG {
            let p = angle_to_pulse(a);
            assert!(p >= last && p <= PULSE_MAX, "pulse {} for {} deg", p, a);
            last = p;
        }
        assert_eq!(angle_to_pulse(u8::MAX), PULSE_MAX);
    }

    #[test]
    fn test_instant_move() {
        let mut ds = store();

        assert_eq!(instant_move(&mut ds, JointId::Wrist, 126).unwrap(), 126);
        assert_eq!(ds.positions.get(JointId::Wrist), 126);
        assert_eq!(ds.driver.writes, vec![(8, angle_to_pulse(126))]);
        assert!(ds.delay.0.is_empty());
    }

    #[test]
    fn test_instant_move_saturates() {
        let mut ds = store();

        assert_eq!(instant_move(&mut ds, JointId::Base, 250).unwrap(), 180);
        assert_eq!(ds.positions.get(JointId::Base), 180);
        assert_eq!(instant_move(&mut ds, JointId::Base, -5).unwrap(), 0);
        assert_eq!(ds.positions.get(JointId::Base), 0);
        assert_eq!(ds.driver.writes, vec![(1, 600), (1, 150)]);
    }

    #[test]
    fn test_smooth_move_visits_every_angle() {
        let mut ds = store();
        ds.positions.set(JointId::Elbow, 40);
        let mut checks = 0;

        smooth_move(&mut ds, JointId::Elbow, 32, &mut || checks += 1).unwrap();

        let expected: Vec<(u8, u16)> = (32..=40u8).rev().map(|a| (7, angle_to_pulse(a))).collect();
        assert_eq!(ds.driver.writes, expected);
        assert_eq!(ds.delay.0, vec![STEP_DELAY_MS; 8]);
        assert_eq!(checks, 8);
        assert_eq!(ds.positions.get(JointId::Elbow), 32);
    }

    #[test]
    fn test_smooth_move_upwards() {
        let mut ds = store();
        ds.positions.set(JointId::Gripper, 0);

        smooth_move(&mut ds, JointId::Gripper, 3, &mut || ()).unwrap();

        let angles: Vec<u16> = ds.driver.writes.iter().map(|&(_, p)| p).collect();
        assert_eq!(
            angles,
            vec![angle_to_pulse(0), angle_to_pulse(1), angle_to_pulse(2), angle_to_pulse(3)]
        );
    }

    #[test]
    fn test_smooth_move_no_op() {
        let mut ds = store();
        let before = ds.positions.get(JointId::Shoulder);

        smooth_move(&mut ds, JointId::Shoulder, before as i32, &mut || ()).unwrap();

        assert!(ds.driver.writes.is_empty());
        assert!(ds.delay.0.is_empty());
    }

    #[test]
    fn test_smooth_move_saturates() {
        let mut ds = store();
        ds.positions.set(JointId::WristRot, 178);

        assert_eq!(smooth_move(&mut ds, JointId::WristRot, 400, &mut || ()).unwrap(), 180);
        assert_eq!(ds.positions.get(JointId::WristRot), 180);
        assert_eq!(ds.driver.writes.last(), Some(&(11, 600)));
        assert_eq!(ds.driver.writes.len(), 3);
    }

    #[test]
    fn test_smooth_move_fault_keeps_last_written_angle() {
        let mut ds = store();
        ds.positions.set(JointId::Base, 10);
        ds.driver.fail_after = Some(3);

        match smooth_move(&mut ds, JointId::Base, 20, &mut || ()) {
            Err(ArmError::Servo { joint, source }) => {
                assert_eq!(joint, JointId::Base);
                assert_eq!(source, ServoError::I2c);
            }
            r => panic!("Expected a servo fault, got {:?}", r),
        }

        // Writes of 10, 11, 12 succeeded
        assert_eq!(ds.positions.get(JointId::Base), 12);
    }
}
