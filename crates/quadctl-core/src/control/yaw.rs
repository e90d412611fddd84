//! Yaw controller
//!
//! Proportional control on wrapped yaw error, producing a desired yaw
//! rate for the body-rate loop.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Yaw controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YawController {
    /// Yaw angle P gain
    pub kp_yaw: f64,
}

impl YawController {
    pub fn new(kp_yaw: f64) -> Self {
        Self { kp_yaw }
    }

    /// Desired yaw rate [rad/s] from commanded and current yaw [rad]
    ///
    /// The command is wrapped into [-2π, 2π]. The current yaw is then
    /// shifted by ±2π when it sits in the quadrant adjacent to the ±π
    /// seam opposite the command, so a small heading change does not
    /// read as a near-360° error. The window only covers yaw values
    /// within π/2 of the seam; this is intentionally not a general
    /// shortest-path unwrap (see DESIGN.md).
    pub fn compute(&self, yaw_cmd: f64, yaw: f64) -> f64 {
        let yaw_cmd = yaw_cmd % TAU;
        let mut yaw = yaw;

        if yaw_cmd > 0.0 && (-PI..=-FRAC_PI_2).contains(&yaw) {
            yaw += TAU;
        }
        if yaw_cmd < 0.0 && (FRAC_PI_2..=PI).contains(&yaw) {
            yaw -= TAU;
        }

        self.kp_yaw * (yaw_cmd - yaw)
    }
}
