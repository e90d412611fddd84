//! Roll-pitch attitude controller
//!
//! Middle loop: converts a desired horizontal acceleration and the
//! current attitude into desired roll and pitch rates. The tilt of
//! the vehicle is represented by the X/Y components of the body
//! z-axis expressed in the world frame (R02, R12); for small angles
//! these are proportional to the lean angle.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::math::rotation_matrix_from_quaternion;

/// Roll-pitch controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollPitchController {
    /// Tilt P gain
    pub kp_bank: f64,
    /// Tilt-term limit [rad]
    pub max_tilt_angle: f64,
    /// Vehicle mass [kg]
    pub mass: f64,
}

impl RollPitchController {
    pub fn new(kp_bank: f64, max_tilt_angle: f64, mass: f64) -> Self {
        Self {
            kp_bank,
            max_tilt_angle,
            mass,
        }
    }

    /// Desired body rates [p, q, 0] [rad/s]
    ///
    /// # Arguments
    /// * `accel_cmd` - Desired acceleration [m/s²] (world frame; only
    ///   X/Y are used)
    /// * `attitude` - Current attitude (body to world)
    /// * `coll_thrust_cmd` - Desired collective thrust [N]
    ///
    /// When the commanded thrust direction is inverted
    /// (`coll_thrust_cmd / mass < 0`, e.g. near-inverted flight) the
    /// acceleration-tracking law is bypassed and the tilt terms are
    /// driven toward zero instead.
    ///
    /// Singular when R22 ≈ 0 (≈90° tilt): the kinematic inversion
    /// divides by R22 and the output grows without bound. Inherent to
    /// the tilt-term parameterization, deliberately not guarded.
    pub fn compute(
        &self,
        accel_cmd: &Vector3<f64>,
        attitude: &UnitQuaternion<f64>,
        coll_thrust_cmd: f64,
    ) -> Vector3<f64> {
        let r = rotation_matrix_from_quaternion(attitude);
        let c = coll_thrust_cmd / self.mass;

        let tilt_x = r[(0, 2)];
        let tilt_y = r[(1, 2)];

        let (tilt_x_dot, tilt_y_dot) = if c < 0.0 {
            (self.kp_bank * -tilt_x, self.kp_bank * -tilt_y)
        } else {
            let limit = self.max_tilt_angle;
            let tilt_x_cmd = (accel_cmd.x / c).clamp(-limit, limit);
            let tilt_y_cmd = (accel_cmd.y / c).clamp(-limit, limit);
            (
                self.kp_bank * (tilt_x_cmd - tilt_x),
                self.kp_bank * (tilt_y_cmd - tilt_y),
            )
        };

        // First-order inversion of the attitude kinematics, restricted
        // to the two horizontal tilt channels.
        let p = (r[(1, 0)] * tilt_x_dot - r[(0, 0)] * tilt_y_dot) / r[(2, 2)];
        let q = (r[(1, 1)] * tilt_x_dot - r[(0, 1)] * tilt_y_dot) / r[(2, 2)];

        Vector3::new(p, q, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_controller() -> RollPitchController {
        RollPitchController::new(12.0, 0.7, 0.5)
    }

    #[test]
    fn test_level_no_accel_no_rates() {
        let controller = create_test_controller();

        let pqr = controller.compute(
            &Vector3::zeros(),
            &UnitQuaternion::identity(),
            controller.mass * 9.81,
        );

        assert_relative_eq!(pqr.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_yaw_rate_left_at_zero() {
        let controller = create_test_controller();

        let pqr = controller.compute(
            &Vector3::new(2.0, -1.0, 0.0),
            &UnitQuaternion::identity(),
            4.905,
        );

        assert_relative_eq!(pqr.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_level_accel_command_tilts() {
        let controller = create_test_controller();
        let thrust = controller.mass * 9.81; // c = 9.81

        let pqr = controller.compute(
            &Vector3::new(2.0, 0.0, 0.0),
            &UnitQuaternion::identity(),
            thrust,
        );

        // For identity attitude: p = R10·ẋ − R00·ẏ = -ẏ-channel only,
        // q = R11·ẋ = ẋ-channel. An X acceleration request maps to a
        // positive pitch-channel rate.
        let expected_q = controller.kp_bank * (2.0 / 9.81);
        assert_relative_eq!(pqr.x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(pqr.y, expected_q, epsilon = 1e-10);
    }

    #[test]
    fn test_tilt_command_clamped() {
        let controller = create_test_controller();
        let thrust = controller.mass * 9.81;

        // Huge acceleration request: tilt target saturates at
        // max_tilt_angle rather than growing with the request.
        let pqr = controller.compute(
            &Vector3::new(1000.0, 0.0, 0.0),
            &UnitQuaternion::identity(),
            thrust,
        );

        let expected_q = controller.kp_bank * controller.max_tilt_angle;
        assert_relative_eq!(pqr.y, expected_q, epsilon = 1e-10);
    }

    #[test]
    fn test_inverted_thrust_levels_out() {
        let controller = create_test_controller();

        // Slightly rolled, thrust command inverted: the controller
        // must drive the tilt terms toward zero, ignoring accel_cmd.
        let attitude = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.2);
        let r = rotation_matrix_from_quaternion(&attitude);

        let pqr = controller.compute(&Vector3::new(5.0, 5.0, 0.0), &attitude, -1.0);

        let tilt_x_dot = controller.kp_bank * -r[(0, 2)];
        let tilt_y_dot = controller.kp_bank * -r[(1, 2)];
        let expected_p = (r[(1, 0)] * tilt_x_dot - r[(0, 0)] * tilt_y_dot) / r[(2, 2)];
        assert_relative_eq!(pqr.x, expected_p, epsilon = 1e-10);
    }
}
