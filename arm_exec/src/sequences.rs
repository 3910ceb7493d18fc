//! # Sequence Library
//!
//! The fixed motion sequences of the arm. The order of the waypoints within a sequence matters:
//! it keeps the arm clear of itself, for example the base turns before the arm reaches out.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fmt;

use crate::joints::JointId::{self, *};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Settle time between the waypoints of a multi-joint sequence.
///
/// Units: milliseconds
pub const STEP_SETTLE_MS: u32 = 300;

/// Settle time after the final waypoint of a sequence.
///
/// Units: milliseconds
pub const FINAL_SETTLE_MS: u32 = 500;

const APPROACH: [Waypoint; 6] = [
    Waypoint::new(Base, 0, STEP_SETTLE_MS),
    Waypoint::new(Shoulder, 0, STEP_SETTLE_MS),
    Waypoint::new(Elbow, 32, STEP_SETTLE_MS),
    Waypoint::new(Wrist, 108, STEP_SETTLE_MS),
    Waypoint::new(WristRot, 85, STEP_SETTLE_MS),
    Waypoint::new(Gripper, 98, FINAL_SETTLE_MS),
];

const GRAB: [Waypoint; 1] = [Waypoint::new(Gripper, 115, FINAL_SETTLE_MS)];

const DROP: [Waypoint; 4] = [
    Waypoint::new(Base, 80, STEP_SETTLE_MS),
    Waypoint::new(Shoulder, 110, STEP_SETTLE_MS),
    Waypoint::new(Wrist, 97, STEP_SETTLE_MS),
    Waypoint::new(WristRot, 100, FINAL_SETTLE_MS),
];

const RELEASE: [Waypoint; 1] = [Waypoint::new(Gripper, 0, FINAL_SETTLE_MS)];

const HOME: [Waypoint; 6] = [
    Waypoint::new(Base, 17, STEP_SETTLE_MS),
    Waypoint::new(Shoulder, 40, STEP_SETTLE_MS),
    Waypoint::new(Elbow, 40, STEP_SETTLE_MS),
    Waypoint::new(Wrist, 126, STEP_SETTLE_MS),
    Waypoint::new(WristRot, 56, STEP_SETTLE_MS),
    Waypoint::new(Gripper, 0, STEP_SETTLE_MS),
];

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Identifies one of the fixed sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceId {
    Approach,
    Grab,
    Drop,
    Release,
    Home,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single joint target within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waypoint {
    pub joint: JointId,

    /// Units: degrees
    pub target_deg: i32,

    /// Time to wait after the joint reaches the target.
    ///
    /// Units: milliseconds
    pub settle_ms: u32,
}

/// A named, ordered list of waypoints.
#[derive(Debug, Clone, Copy)]
pub struct Sequence {
    pub id: SequenceId,

    pub waypoints: &'static [Waypoint],
}

/// Lookup of the sequences by identifier.
#[derive(Debug, Clone)]
pub struct SequenceLibrary {
    sequences: [Sequence; 5],
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SequenceId {
    pub const ALL: [SequenceId; 5] = [
        SequenceId::Approach,
        SequenceId::Grab,
        SequenceId::Drop,
        SequenceId::Release,
        SequenceId::Home,
    ];
}

impl fmt::Display for SequenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Waypoint {
    pub const fn new(joint: JointId, target_deg: i32, settle_ms: u32) -> Self {
        Self {
            joint,
            target_deg,
            settle_ms,
        }
    }
}

impl SequenceLibrary {
    #[rustfmt::skip]
    pub fn new() -> Self {
        Self {
            sequences: [
                Sequence { id: SequenceId::Approach, waypoints: &APPROACH },
                Sequence { id: SequenceId::Grab, waypoints: &GRAB },
                Sequence { id: SequenceId::Drop, waypoints: &DROP },
                Sequence { id: SequenceId::Release, waypoints: &RELEASE },
                Sequence { id: SequenceId::Home, waypoints: &HOME },
            ],
        }
    }

    /// Get a sequence by identifier.
    pub fn get(&self, id: SequenceId) -> &Sequence {
        match id {
            SequenceId::Approach => &self.sequences[0],
            SequenceId::Grab => &self.sequences[1],
            SequenceId::Drop => &self.sequences[2],
            SequenceId::Release => &self.sequences[3],
            SequenceId::Home => &self.sequences[4],
        }
    }
}

impl Default for SequenceLibrary {
    fn default() -> Self {
        Self::new()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
