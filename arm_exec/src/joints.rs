//! # Joint Registry
//!
//! Static description of the six joints of the arm: their display names, the servo driver
//! channel (port) each one is wired to, and the angle each one takes on power up.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of joints on the arm.
pub const NUM_JOINTS: usize = 6;

/// Wiring and home pose of each joint, indexed by [`JointId`].
#[rustfmt::skip]
const JOINT_TABLE: [Joint; NUM_JOINTS] = [
    Joint { id: JointId::Base, name: "Base", channel: 1, home_deg: 17 },
    Joint { id: JointId::Shoulder, name: "Shoulder", channel: 4, home_deg: 40 },
    Joint { id: JointId::Elbow, name: "Elbow", channel: 7, home_deg: 40 },
    Joint { id: JointId::Wrist, name: "Wrist", channel: 8, home_deg: 126 },
    Joint { id: JointId::WristRot, name: "WristRot", channel: 11, home_deg: 56 },
    Joint { id: JointId::Gripper, name: "Gripper", channel: 15, home_deg: 0 },
];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Identifies one joint of the arm.
///
/// The discriminant is the joint's index, base first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointId {
    Base = 0,
    Shoulder = 1,
    Elbow = 2,
    Wrist = 3,
    WristRot = 4,
    Gripper = 5,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Metadata of a single joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joint {
    pub id: JointId,

    /// Display label
    pub name: &'static str,

    /// Port on the servo driver board this joint's servo is wired to
    pub channel: u8,

    /// Angle the joint is sent to on power up.
    ///
    /// Units: degrees
    pub home_deg: u8,
}

/// Read-only lookup of joint metadata.
///
/// The joint to channel mapping is fixed when the registry is built and cannot be changed
/// afterwards.
#[derive(Debug, Clone)]
pub struct JointRegistry {
    joints: [Joint; NUM_JOINTS],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JointId {
    /// All joints in index order.
    pub const ALL: [JointId; NUM_JOINTS] = [
        JointId::Base,
        JointId::Shoulder,
        JointId::Elbow,
        JointId::Wrist,
        JointId::WristRot,
        JointId::Gripper,
    ];

    /// Index of the joint in `[0, NUM_JOINTS)`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(JOINT_TABLE[self.index()].name)
    }
}

impl JointRegistry {
    /// Build the registry for the arm's wiring.
    pub fn new() -> Self {
        Self { joints: JOINT_TABLE }
    }

    /// Get the metadata of a joint.
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    /// Iterate over all joints in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Joint> {
        self.joints.iter()
    }

    /// Render the joint to port table, one line per joint.
    pub fn map_text(&self) -> String {
        let mut text = String::from("Joint map:");
        for j in self.iter() {
            text.push_str(&format!(
                "\n  [{}] {:<8} -> port {:>2}",
                j.id.index(),
                j.name,
                j.channel
            ));
        }
        text
    }
}

impl Default for JointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
