//! Trajectory points and reference sources
//!
//! Trajectory generation itself is an external concern; the cascade
//! only asks a [`TrajectorySource`] for the point matching the
//! current simulation time. Two minimal sources are provided so the
//! cascade can be driven in tests and demos without a planner.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::math::yaw_from_quaternion;

/// One desired trajectory sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Sample time [s]
    pub time: f64,
    /// Desired position [m] (world frame, NED)
    pub position: Vector3<f64>,
    /// Desired velocity [m/s] (world frame, NED)
    pub velocity: Vector3<f64>,
    /// Feed-forward acceleration [m/s²] (world frame, NED)
    pub acceleration: Vector3<f64>,
    /// Desired attitude (body to world)
    pub orientation: UnitQuaternion<f64>,
}

impl Default for TrajectoryPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl TrajectoryPoint {
    /// Desired yaw angle [rad]
    pub fn yaw(&self) -> f64 {
        yaw_from_quaternion(&self.orientation)
    }
}

/// Provider of trajectory points, indexed by simulation time
pub trait TrajectorySource {
    /// Trajectory point for the given simulation time [s]
    fn point_at(&self, sim_time: f64) -> TrajectoryPoint;
}

/// Constant reference: hold one position and heading
#[derive(Debug, Clone)]
pub struct HoverReference {
    /// Hold position [m]
    pub position: Vector3<f64>,
    /// Hold attitude
    pub orientation: UnitQuaternion<f64>,
}

impl HoverReference {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

impl TrajectorySource for HoverReference {
    fn point_at(&self, sim_time: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            time: sim_time,
            position: self.position,
            orientation: self.orientation,
            ..Default::default()
        }
    }
}

/// Constant-velocity straight-line reference
#[derive(Debug, Clone)]
pub struct LineReference {
    /// Position at t = 0 [m]
    pub start: Vector3<f64>,
    /// Constant velocity [m/s]
    pub velocity: Vector3<f64>,
    /// Hold attitude
    pub orientation: UnitQuaternion<f64>,
}

impl LineReference {
    pub fn new(
        start: Vector3<f64>,
        velocity: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
    ) -> Self {
        Self {
            start,
            velocity,
            orientation,
        }
    }
}

impl TrajectorySource for LineReference {
    fn point_at(&self, sim_time: f64) -> TrajectoryPoint {
        TrajectoryPoint {
            time: sim_time,
            position: self.start + self.velocity * sim_time,
            velocity: self.velocity,
            orientation: self.orientation,
            ..Default::default()
        }
    }
}
