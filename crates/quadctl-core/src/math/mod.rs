//! Mathematical utilities
//!
//! Rotation helpers shared by the control laws.

pub mod rotation;

pub use rotation::*;
