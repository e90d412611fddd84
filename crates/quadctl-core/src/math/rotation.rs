//! SO(3) rotation utilities
//!
//! Conversions between the quaternion attitude estimate and the
//! rotation-matrix / Euler quantities the control laws work with.

use nalgebra::{Matrix3, UnitQuaternion};

/// Rotation matrix from quaternion
///
/// Extracts the 3x3 body-to-world rotation matrix R(q) ∈ SO(3).
pub fn rotation_matrix_from_quaternion(q: &UnitQuaternion<f64>) -> Matrix3<f64> {
    *q.to_rotation_matrix().matrix()
}

/// Yaw angle from quaternion (ZYX Euler convention) [rad]
pub fn yaw_from_quaternion(q: &UnitQuaternion<f64>) -> f64 {
    q.euler_angles().2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    #[test]
    fn test_rotation_matrix_identity() {
        let q = UnitQuaternion::identity();
        let r = rotation_matrix_from_quaternion(&q);

        assert_relative_eq!(r, Matrix3::identity(), epsilon = 1e-10);
    }

    #[test]
    fn test_rotation_matrix_orthogonal() {
        let q = UnitQuaternion::from_axis_angle(
            &nalgebra::Unit::new_normalize(Vector3::new(1.0, 1.0, 1.0)),
            1.0,
        );
        let r = rotation_matrix_from_quaternion(&q);

        // R * R^T = I
        assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-10);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_yaw_identity() {
        let q = UnitQuaternion::identity();
        assert_relative_eq!(yaw_from_quaternion(&q), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), PI / 2.0);
        assert_relative_eq!(yaw_from_quaternion(&q), PI / 2.0, epsilon = 1e-6);

        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -PI / 2.0);
        assert_relative_eq!(yaw_from_quaternion(&q), -PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_yaw_unaffected_by_small_tilt() {
        // Yaw about z composed with a small pitch should still report
        // the same heading.
        let yaw = 0.7;
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
            * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.05);

        assert_relative_eq!(yaw_from_quaternion(&q), yaw, epsilon = 1e-6);
    }
}
