//! Lateral position controller
//!
//! Outer horizontal loop: PD with acceleration feed-forward on NED
//! X/Y position and velocity error, producing a desired world-frame
//! horizontal acceleration for the roll-pitch controller. Fully
//! decoupled from the vertical channel.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Lateral position controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LateralPositionController {
    /// Horizontal position P gain
    pub kp_pos_xy: f64,
    /// Horizontal velocity D gain
    pub kp_vel_xy: f64,
    /// Maximum horizontal acceleration [m/s²]
    pub max_accel_xy: f64,
    /// Maximum horizontal speed [m/s]
    ///
    /// Loaded with the gain set but not applied by this law
    /// (inherited behavior; see the open-question notes in DESIGN.md).
    pub max_speed_xy: f64,
}

impl LateralPositionController {
    pub fn new(kp_pos_xy: f64, kp_vel_xy: f64, max_accel_xy: f64, max_speed_xy: f64) -> Self {
        Self {
            kp_pos_xy,
            kp_vel_xy,
            max_accel_xy,
            max_speed_xy,
        }
    }

    /// Desired horizontal acceleration [m/s²] (world frame, Z = 0)
    ///
    /// The Z components of the feed-forward and velocity commands are
    /// discarded and the desired Z position is overridden with the
    /// current one, so vertical control stays with the altitude loop.
    /// The total demand is clamped to ±max_accel_xy per axis, then
    /// sign-inverted to line up with the roll-pitch controller's NED
    /// convention.
    pub fn compute(
        &self,
        pos_cmd: &Vector3<f64>,
        vel_cmd: &Vector3<f64>,
        pos: &Vector3<f64>,
        vel: &Vector3<f64>,
        accel_cmd_ff: &Vector3<f64>,
    ) -> Vector3<f64> {
        let mut pos_cmd = *pos_cmd;
        let mut vel_cmd = *vel_cmd;
        let mut accel_ff = *accel_cmd_ff;

        accel_ff.z = 0.0;
        vel_cmd.z = 0.0;
        pos_cmd.z = pos.z;

        let pos_err = pos_cmd - pos;
        let vel_err = vel_cmd - vel;

        let demand_x = accel_ff.x + self.kp_pos_xy * pos_err.x + self.kp_vel_xy * vel_err.x;
        let demand_y = accel_ff.y + self.kp_pos_xy * pos_err.y + self.kp_vel_xy * vel_err.y;

        Vector3::new(
            -demand_x.clamp(-self.max_accel_xy, self.max_accel_xy),
            -demand_y.clamp(-self.max_accel_xy, self.max_accel_xy),
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_controller() -> LateralPositionController {
        LateralPositionController::new(25.0, 10.0, 8.0, 5.0)
    }

    #[test]
    fn test_feed_forward_passthrough() {
        let controller = create_test_controller();
        let pos = Vector3::new(1.0, 2.0, -3.0);
        let vel = Vector3::new(0.5, -0.5, 0.1);
        let ff = Vector3::new(1.5, -2.5, 7.0);

        // Zero position/velocity error: output is exactly the
        // sign-inverted feed-forward, with its Z discarded.
        let accel = controller.compute(&pos, &vel, &pos, &vel, &ff);

        assert_relative_eq!(accel, Vector3::new(-1.5, 2.5, 0.0), epsilon = 1e-10);
    }

    #[test]
    fn test_feed_forward_clamped() {
        let controller = create_test_controller();
        let pos = Vector3::zeros();
        let vel = Vector3::zeros();
        let ff = Vector3::new(100.0, -100.0, 0.0);

        let accel = controller.compute(&pos, &vel, &pos, &vel, &ff);

        assert_relative_eq!(accel.x, -controller.max_accel_xy, epsilon = 1e-10);
        assert_relative_eq!(accel.y, controller.max_accel_xy, epsilon = 1e-10);
    }

    #[test]
    fn test_vertical_channel_ignored() {
        let controller = create_test_controller();

        // Large vertical discrepancy in every input must not leak
        // into the horizontal demand.
        let accel = controller.compute(
            &Vector3::new(0.0, 0.0, -50.0),
            &Vector3::new(0.0, 0.0, -10.0),
            &Vector3::zeros(),
            &Vector3::zeros(),
            &Vector3::new(0.0, 0.0, 30.0),
        );

        assert_relative_eq!(accel.norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_pd_terms() {
        let controller = create_test_controller();

        let accel = controller.compute(
            &Vector3::new(1.0, 0.0, 0.0),
            &Vector3::new(0.5, 0.0, 0.0),
            &Vector3::zeros(),
            &Vector3::zeros(),
            &Vector3::zeros(),
        );

        let expected = -(controller.kp_pos_xy * 1.0 + controller.kp_vel_xy * 0.5);
        assert_relative_eq!(accel.x, expected.clamp(-8.0, 8.0), epsilon = 1e-10);
        assert_relative_eq!(accel.y, 0.0, epsilon = 1e-10);
    }
}
