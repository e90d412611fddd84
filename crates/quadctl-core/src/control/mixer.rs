//! Motor mixer
//!
//! Inverts the X-configuration thrust/moment mixing matrix: a desired
//! collective thrust and 3-axis moment become four individual motor
//! thrusts. With d = L/√2 the effective per-axis moment arm:
//!
//! ```text
//!   front-left (CW)    front-right (CCW)
//!          \    +x    /
//!           \   |    /
//!     +y ----  CoM  ----
//!           /        \
//!          /          \
//!   rear-left (CCW)   rear-right (CW)
//! ```
//!
//! Roll is left/right differential, pitch front/rear, yaw CW/CCW.
//! The sign table maps each motor to its spin direction and position;
//! it must match the airframe exactly.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Per-motor thrust commands [N], one control tick's output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorCommand {
    /// Front-left motor thrust [N]
    pub front_left: f64,
    /// Front-right motor thrust [N]
    pub front_right: f64,
    /// Rear-left motor thrust [N]
    pub rear_left: f64,
    /// Rear-right motor thrust [N]
    pub rear_right: f64,
}

impl MotorCommand {
    /// Thrusts ordered front-left, front-right, rear-left, rear-right
    pub fn to_array(self) -> [f64; 4] {
        [
            self.front_left,
            self.front_right,
            self.rear_left,
            self.rear_right,
        ]
    }

    /// Sum of the four motor thrusts [N]
    pub fn collective(&self) -> f64 {
        self.front_left + self.front_right + self.rear_left + self.rear_right
    }
}

/// Inverse mixing stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotorMixer {
    /// Arm length L [m]
    pub arm_length: f64,
    /// Drag-to-thrust ratio κ
    pub kappa: f64,
}

impl MotorMixer {
    pub fn new(arm_length: f64, kappa: f64) -> Self {
        Self { arm_length, kappa }
    }

    /// Four motor thrusts [N] from collective thrust [N] and moment [N·m]
    ///
    /// No per-motor clamping happens here; motor limits are applied
    /// upstream to the collective thrust only (inherited behavior;
    /// see the open-question notes in DESIGN.md).
    pub fn compute(&self, coll_thrust_cmd: f64, moment_cmd: &Vector3<f64>) -> MotorCommand {
        let d = self.arm_length / 2.0_f64.sqrt();

        let c_bar = coll_thrust_cmd;
        let p_bar = moment_cmd.x / d;
        let q_bar = moment_cmd.y / d;
        let r_bar = -moment_cmd.z / self.kappa;

        MotorCommand {
            front_left: 0.25 * (c_bar + p_bar + q_bar + r_bar),
            front_right: 0.25 * (c_bar - p_bar + q_bar - r_bar),
            rear_left: 0.25 * (c_bar + p_bar - q_bar - r_bar),
            rear_right: 0.25 * (c_bar - p_bar - q_bar + r_bar),
        }
    }
}
