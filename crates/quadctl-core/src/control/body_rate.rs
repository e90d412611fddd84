//! Body-rate controller
//!
//! Innermost loop: proportional control on body-rate error, scaled by
//! the principal moments of inertia.
//!
//! M = diag(I) · (kp_pqr ∘ (ω_cmd − ω))

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Body-rate controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyRateController {
    /// P gains per axis [p, q, r]
    pub kp_pqr: Vector3<f64>,
    /// Principal moments of inertia Ixx, Iyy, Izz [kg·m²]
    pub inertia: Vector3<f64>,
}

impl BodyRateController {
    pub fn new(kp_pqr: Vector3<f64>, inertia: Vector3<f64>) -> Self {
        Self { kp_pqr, inertia }
    }

    /// Desired moment [N·m] from desired and current body rates [rad/s]
    ///
    /// Pure proportional control, no saturation; total over all inputs.
    pub fn compute(&self, pqr_cmd: &Vector3<f64>, pqr: &Vector3<f64>) -> Vector3<f64> {
        let rate_error = pqr_cmd - pqr;
        self.inertia
            .component_mul(&self.kp_pqr.component_mul(&rate_error))
    }
}
