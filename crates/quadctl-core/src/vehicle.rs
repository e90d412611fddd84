//! Vehicle state and physical parameters
//!
//! The state estimate is supplied fresh each tick by an external
//! estimator and treated as ground truth; the controllers never
//! mutate it.

use nalgebra::{Matrix3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::math::{rotation_matrix_from_quaternion, yaw_from_quaternion};
use crate::GRAVITY;

/// Estimated vehicle state for one control tick
#[derive(Debug, Clone)]
pub struct VehicleState {
    /// Position [m] (world frame, NED)
    pub position: Vector3<f64>,
    /// Velocity [m/s] (world frame, NED)
    pub velocity: Vector3<f64>,
    /// Attitude (body to world)
    pub orientation: UnitQuaternion<f64>,
    /// Body rates p, q, r [rad/s] (body frame)
    pub angular_velocity: Vector3<f64>,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl VehicleState {
    /// Body-to-world rotation matrix for the current attitude
    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        rotation_matrix_from_quaternion(&self.orientation)
    }

    /// Current yaw angle [rad]
    pub fn yaw(&self) -> f64 {
        yaw_from_quaternion(&self.orientation)
    }
}

/// Physical parameters of the vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleParams {
    /// Mass [kg]
    pub mass: f64,
    /// Arm length L [m] (center of mass to rotor)
    pub arm_length: f64,
    /// Drag-to-thrust ratio κ (rotor torque / rotor thrust)
    pub kappa: f64,
    /// Principal moments of inertia Ixx, Iyy, Izz [kg·m²]
    pub inertia: Vector3<f64>,
}

impl VehicleParams {
    pub fn new(mass: f64, arm_length: f64, kappa: f64, inertia: Vector3<f64>) -> Self {
        Self {
            mass,
            arm_length,
            kappa,
            inertia,
        }
    }

    /// Collective thrust that balances gravity [N]
    pub fn hover_thrust(&self) -> f64 {
        self.mass * GRAVITY
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        // 500 g racer-class airframe
        Self::new(0.5, 0.17, 0.016, Vector3::new(0.0023, 0.0023, 0.0046))
    }
}
