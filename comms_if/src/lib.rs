//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the arm sequencing software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Arm telecommand tokens
pub mod tc;

/// Network module
pub mod net;
