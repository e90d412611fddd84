//! Parameter providers and control gains
//!
//! Gains and limits reach the controllers through the [`ParamSource`]
//! trait: a flat namespace of dotted keys with per-key fallback
//! defaults. Which concrete provider backs it (a parsed config table,
//! a hardware parameter store, ...) is decided at construction time;
//! the controllers never know.

use std::collections::HashMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a parameter table
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("malformed line `{0}`: expected `key = value`")]
    MalformedLine(String),
    #[error("invalid number `{value}` for key `{key}`")]
    InvalidNumber { key: String, value: String },
    #[error("expected 3 components for key `{key}`, got {count}")]
    BadVectorArity { key: String, count: usize },
}

/// A single parameter value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f64),
    Vector(Vector3<f64>),
}

/// Flat key/value parameter provider
///
/// Missing keys silently fall back to the caller's default; that is
/// part of the loading contract, not an error.
pub trait ParamSource {
    /// Scalar parameter, or `default` if the key is absent
    fn scalar(&self, key: &str, default: f64) -> f64;

    /// Vector parameter, or `default` if the key is absent
    fn vector(&self, key: &str, default: Vector3<f64>) -> Vector3<f64>;
}

/// In-memory parameter table
///
/// Deserializable with serde, or parsed from the plain text format of
/// simulator config files: one `key = value` per line, `#` comments,
/// vectors written as `x, y, z`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamTable {
    values: HashMap<String, ParamValue>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scalar(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), ParamValue::Scalar(value));
    }

    pub fn set_vector(&mut self, key: impl Into<String>, value: Vector3<f64>) {
        self.values.insert(key.into(), ParamValue::Vector(value));
    }

    /// Parse a table from `key = value` text
    pub fn parse(text: &str) -> Result<Self, ParamError> {
        let mut table = Self::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| ParamError::MalformedLine(line.to_string()))?;
            let key = key.trim();
            let value = value.trim();

            if value.contains(',') {
                let parts: Vec<&str> = value.split(',').map(str::trim).collect();
                if parts.len() != 3 {
                    return Err(ParamError::BadVectorArity {
                        key: key.to_string(),
                        count: parts.len(),
                    });
                }
                let mut v = Vector3::zeros();
                for (i, part) in parts.iter().enumerate() {
                    v[i] = parse_number(key, part)?;
                }
                table.set_vector(key, v);
            } else {
                table.set_scalar(key, parse_number(key, value)?);
            }
        }

        Ok(table)
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ParamError> {
    value.parse().map_err(|_| ParamError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl ParamSource for ParamTable {
    fn scalar(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            Some(ParamValue::Scalar(v)) => *v,
            _ => default,
        }
    }

    fn vector(&self, key: &str, default: Vector3<f64>) -> Vector3<f64> {
        match self.values.get(key) {
            Some(ParamValue::Vector(v)) => *v,
            _ => default,
        }
    }
}

/// Gains and limits for the control cascade
///
/// One flat set, matching the dotted-key layout of the config store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlGains {
    /// Horizontal position P gain
    pub kp_pos_xy: f64,
    /// Vertical position P gain
    pub kp_pos_z: f64,
    /// Vertical position I gain
    pub ki_pos_z: f64,
    /// Horizontal velocity D gain
    pub kp_vel_xy: f64,
    /// Vertical velocity D gain
    pub kp_vel_z: f64,
    /// Roll/pitch tilt P gain
    pub kp_bank: f64,
    /// Yaw angle P gain
    pub kp_yaw: f64,
    /// Body rate P gains per axis [p, q, r]
    pub kp_pqr: Vector3<f64>,
    /// Maximum descent rate [m/s]
    pub max_descent_rate: f64,
    /// Maximum ascent rate [m/s]
    pub max_ascent_rate: f64,
    /// Maximum horizontal speed [m/s]
    ///
    /// Carried with the gain set but not applied by the lateral law;
    /// see the open-question notes in DESIGN.md.
    pub max_speed_xy: f64,
    /// Maximum horizontal acceleration [m/s²]
    pub max_accel_xy: f64,
    /// Maximum tilt term (lean limit, small-angle) [rad]
    pub max_tilt_angle: f64,
    /// Minimum thrust per motor [N]
    pub min_motor_thrust: f64,
    /// Maximum thrust per motor [N]
    pub max_motor_thrust: f64,
}

impl Default for ControlGains {
    fn default() -> Self {
        // Zero gains, wide-open limits: a freshly constructed gain
        // set commands nothing until tuned.
        Self {
            kp_pos_xy: 0.0,
            kp_pos_z: 0.0,
            ki_pos_z: 0.0,
            kp_vel_xy: 0.0,
            kp_vel_z: 0.0,
            kp_bank: 0.0,
            kp_yaw: 0.0,
            kp_pqr: Vector3::zeros(),
            max_descent_rate: 100.0,
            max_ascent_rate: 100.0,
            max_speed_xy: 100.0,
            max_accel_xy: 100.0,
            max_tilt_angle: 100.0,
            min_motor_thrust: 0.0,
            max_motor_thrust: 100.0,
        }
    }
}

impl ControlGains {
    /// Load gains from a provider under a dotted key prefix
    ///
    /// Keys follow the simulator config naming, including the
    /// historical `maxHorizAccel` spelling for `max_accel_xy`.
    pub fn load(source: &dyn ParamSource, prefix: &str) -> Self {
        let key = |name: &str| format!("{prefix}.{name}");

        Self {
            kp_pos_xy: source.scalar(&key("kpPosXY"), 0.0),
            kp_pos_z: source.scalar(&key("kpPosZ"), 0.0),
            ki_pos_z: source.scalar(&key("KiPosZ"), 0.0),
            kp_vel_xy: source.scalar(&key("kpVelXY"), 0.0),
            kp_vel_z: source.scalar(&key("kpVelZ"), 0.0),
            kp_bank: source.scalar(&key("kpBank"), 0.0),
            kp_yaw: source.scalar(&key("kpYaw"), 0.0),
            kp_pqr: source.vector(&key("kpPQR"), Vector3::zeros()),
            max_descent_rate: source.scalar(&key("maxDescentRate"), 100.0),
            max_ascent_rate: source.scalar(&key("maxAscentRate"), 100.0),
            max_speed_xy: source.scalar(&key("maxSpeedXY"), 100.0),
            max_accel_xy: source.scalar(&key("maxHorizAccel"), 100.0),
            max_tilt_angle: source.scalar(&key("maxTiltAngle"), 100.0),
            min_motor_thrust: source.scalar(&key("minMotorThrust"), 0.0),
            max_motor_thrust: source.scalar(&key("maxMotorThrust"), 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_scalars_and_vectors() {
        let table = ParamTable::parse(
            "# quad gains\n\
             QuadControlParams.kpPosZ = 20\n\
             QuadControlParams.kpPQR = 92, 92, 6\n",
        )
        .unwrap();

        assert_relative_eq!(
            table.scalar("QuadControlParams.kpPosZ", 0.0),
            20.0,
            epsilon = 1e-10
        );
        assert_relative_eq!(
            table.vector("QuadControlParams.kpPQR", Vector3::zeros()),
            Vector3::new(92.0, 92.0, 6.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_missing_key_falls_back() {
        let table = ParamTable::new();

        assert_relative_eq!(table.scalar("nope.kpYaw", 3.0), 3.0, epsilon = 1e-10);
        assert_relative_eq!(
            table.vector("nope.kpPQR", Vector3::new(1.0, 2.0, 3.0)),
            Vector3::new(1.0, 2.0, 3.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            ParamTable::parse("just words"),
            Err(ParamError::MalformedLine(_))
        ));
        assert!(matches!(
            ParamTable::parse("k = 1, 2"),
            Err(ParamError::BadVectorArity { count: 2, .. })
        ));
        assert!(matches!(
            ParamTable::parse("k = fast"),
            Err(ParamError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_load_defaults() {
        let gains = ControlGains::load(&ParamTable::new(), "QuadControlParams");

        assert_relative_eq!(gains.kp_pos_xy, 0.0, epsilon = 1e-10);
        assert_relative_eq!(gains.kp_pqr.norm(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(gains.max_ascent_rate, 100.0, epsilon = 1e-10);
        assert_relative_eq!(gains.max_tilt_angle, 100.0, epsilon = 1e-10);
        assert_relative_eq!(gains.min_motor_thrust, 0.0, epsilon = 1e-10);
        assert_relative_eq!(gains.max_motor_thrust, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_load_from_table() {
        let table = ParamTable::parse(
            "Quad.kpBank = 12\n\
             Quad.kpYaw = 3\n\
             Quad.maxHorizAccel = 12.5\n\
             Quad.kpPQR = 92, 92, 6\n",
        )
        .unwrap();

        let gains = ControlGains::load(&table, "Quad");

        assert_relative_eq!(gains.kp_bank, 12.0, epsilon = 1e-10);
        assert_relative_eq!(gains.kp_yaw, 3.0, epsilon = 1e-10);
        assert_relative_eq!(gains.max_accel_xy, 12.5, epsilon = 1e-10);
        assert_relative_eq!(gains.kp_pqr.z, 6.0, epsilon = 1e-10);
    }
}
