//! # quadctl-core
//!
//! Cascaded flight-control core for an X-configuration quadrotor.
//!
//! Given a trajectory point and a state estimate, the cascade produces
//! four per-motor thrust commands once per control tick:
//!
//! altitude / lateral position (outer) → roll-pitch attitude and yaw
//! (middle) → body rates (inner) → motor mixing.
//!
//! Trajectory generation, state estimation, and parameter storage are
//! external collaborators; this crate only consumes their outputs.
//!
//! ## Modules
//!
//! - [`math`]: rotation utilities (yaw extraction, rotation matrices)
//! - [`vehicle`]: vehicle state and physical parameters
//! - [`trajectory`]: trajectory points and reference sources
//! - [`config`]: parameter providers and control gains
//! - [`control`]: the individual control laws and the cascade

pub mod math;
pub mod vehicle;
pub mod trajectory;
pub mod config;
pub mod control;

use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// Unit quaternion type for rotations
pub type Quat = UnitQuaternion<f64>;

/// Gravity constant [m/s²]
///
/// All controllers use the NED convention: z points down, so gravity
/// is +z in the world frame.
pub const GRAVITY: f64 = 9.81;
