//! # Position Store
//!
//! Last angle commanded to each joint. This is the only record of where the arm is, there are no
//! position sensors.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use crate::joints::{JointId, JointRegistry, NUM_JOINTS};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Angle every joint is assumed to be at before home positioning has run.
///
/// Units: degrees
pub const STARTUP_ANGLE_DEG: u8 = 90;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Current angle of every joint.
///
/// Units: degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionStore {
    angles_deg: [u8; NUM_JOINTS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PositionStore {
    /// Create a store with every joint at [`STARTUP_ANGLE_DEG`].
    pub fn new() -> Self {
        Self {
            angles_deg: [STARTUP_ANGLE_DEG; NUM_JOINTS],
        }
    }

    /// Get the last commanded angle of a joint.
    pub fn get(&self, joint: JointId) -> u8 {
        self.angles_deg[joint.index()]
    }

    /// Overwrite the angle of a joint.
    ///
    /// No validation is done here, the caller is responsible for clamping.
    pub fn set(&mut self, joint: JointId, angle_deg: u8) {
        self.angles_deg[joint.index()] = angle_deg;
    }

    /// All angles in joint index order.
    pub fn angles(&self) -> [u8; NUM_JOINTS] {
        self.angles_deg
    }

    /// Render the current angles, one line per joint.
    pub fn status_text(&self, registry: &JointRegistry) -> String {
        let mut text = String::from("Joint status:");
        for j in registry.iter() {
            text.push_str(&format!(
                "\n  {:<8} (port {:>2}): {:>3} deg",
                j.name,
                j.channel,
                self.get(j.id)
            ));
        }
        text
    }
}

impl Default for PositionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_only_touches_one_joint() {
        let mut store = PositionStore::new();
        store.set(JointId::Elbow, 32);

        assert_eq!(store.get(JointId::Elbow), 32);
        for j in JointId::ALL.iter().filter(|&&j| j != JointId::Elbow) {
            assert_eq!(store.get(*j), STARTUP_ANGLE_DEG);
        }
    }

    #[test]
    fn test_status_text() {
        let mut store = PositionStore::new();
        store.set(JointId::Wrist, 126);
        let text = store.status_text(&JointRegistry::new());

        assert_eq!(text.lines().count(), NUM_JOINTS + 1);
        assert!(text.contains("Wrist    (port  8): 126 deg"));
        assert!(text.contains("Base     (port  1):  90 deg"));
    }
}
