//! Utility library for the arm sequencing software

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod logger;
pub mod params;
pub mod session;
pub mod time;
