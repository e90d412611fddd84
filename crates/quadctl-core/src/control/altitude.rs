//! Altitude controller
//!
//! Outer vertical loop: PID with acceleration feed-forward on NED
//! vertical position/velocity error, producing a collective thrust
//! command in Newtons. The returned thrust is positive when opposing
//! gravity, i.e. negated relative to the internal NED acceleration.
//!
//! This is the only controller with cross-tick state: the integral
//! accumulator. Accumulation is unconditional (no anti-windup, no
//! decay); under sustained error it grows without bound. That is part
//! of the contract, not a failure mode.

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};

use crate::math::rotation_matrix_from_quaternion;
use crate::GRAVITY;

/// Altitude controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AltitudeController {
    /// Vertical position P gain
    pub kp_pos_z: f64,
    /// Vertical velocity D gain
    pub kp_vel_z: f64,
    /// Vertical position I gain
    pub ki_pos_z: f64,
    /// Maximum ascent rate [m/s]
    ///
    /// Bounds the commanded vertical acceleration in both directions;
    /// the descent rate limit is deliberately not used here (see the
    /// open-question notes in DESIGN.md).
    pub max_ascent_rate: f64,
    /// Vehicle mass [kg]
    pub mass: f64,
    /// Integral of vertical position error [m·s]
    integrated_altitude_error: f64,
}

impl AltitudeController {
    pub fn new(
        kp_pos_z: f64,
        kp_vel_z: f64,
        ki_pos_z: f64,
        max_ascent_rate: f64,
        mass: f64,
    ) -> Self {
        Self {
            kp_pos_z,
            kp_vel_z,
            ki_pos_z,
            max_ascent_rate,
            mass,
            integrated_altitude_error: 0.0,
        }
    }

    /// Collective thrust command [N]
    ///
    /// # Arguments
    /// * `pos_z_cmd`, `vel_z_cmd` - Desired vertical position [m] and
    ///   velocity [m/s], NED (down positive)
    /// * `pos_z`, `vel_z` - Current vertical position and velocity
    /// * `attitude` - Current attitude (body to world)
    /// * `accel_z_cmd` - Feed-forward vertical acceleration [m/s²]
    /// * `dt` - Tick duration [s]
    ///
    /// Singular when R22 ≈ 0 (≈90° tilt): the vertical-axis
    /// projection divides by R22. Deliberately not guarded.
    #[allow(clippy::too_many_arguments)]
    pub fn compute(
        &mut self,
        pos_z_cmd: f64,
        vel_z_cmd: f64,
        pos_z: f64,
        vel_z: f64,
        attitude: &UnitQuaternion<f64>,
        accel_z_cmd: f64,
        dt: f64,
    ) -> f64 {
        let pos_z_err = pos_z_cmd - pos_z;
        let vel_z_err = vel_z_cmd - vel_z;
        self.integrated_altitude_error += pos_z_err * dt;

        let b_z = rotation_matrix_from_quaternion(attitude)[(2, 2)];

        let u1_bar = self.kp_pos_z * pos_z_err
            + self.kp_vel_z * vel_z_err
            + accel_z_cmd
            + self.ki_pos_z * self.integrated_altitude_error;

        let accel_z = (u1_bar - GRAVITY) / b_z;

        let accel_limit = self.max_ascent_rate / dt;
        let thrust = accel_z.clamp(-accel_limit, accel_limit) * self.mass;

        -thrust
    }

    /// Reset the integral accumulator
    ///
    /// Called at controller (re)initialization; there are no other
    /// implicit reset points.
    pub fn reset(&mut self) {
        self.integrated_altitude_error = 0.0;
    }
}
