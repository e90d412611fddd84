//! Control cascade orchestrator
//!
//! Runs the full loop once per tick, outer to inner: altitude →
//! lateral position → roll-pitch → yaw → body rate → mixer. Every
//! step is synchronous and total; the only cross-tick state is the
//! altitude integrator. The caller supplies `dt` and the simulation
//! time and must serialize invocations — there is no internal
//! locking.

use crate::config::{ControlGains, ParamSource};
use crate::control::{
    AltitudeController, BodyRateController, LateralPositionController, MotorCommand, MotorMixer,
    RollPitchController, YawController,
};
use crate::trajectory::TrajectorySource;
use crate::vehicle::{VehicleParams, VehicleState};

/// Fraction of the per-motor thrust range reserved as headroom for
/// attitude authority when clamping the collective command.
const THRUST_MARGIN_FRACTION: f64 = 0.1;

/// The full control cascade
#[derive(Debug, Clone)]
pub struct CascadeController {
    altitude: AltitudeController,
    lateral: LateralPositionController,
    roll_pitch: RollPitchController,
    yaw: YawController,
    body_rate: BodyRateController,
    mixer: MotorMixer,
    /// Minimum thrust per motor [N]
    min_motor_thrust: f64,
    /// Maximum thrust per motor [N]
    max_motor_thrust: f64,
}

impl CascadeController {
    /// Build the cascade from physical parameters and a gain set
    pub fn new(params: &VehicleParams, gains: &ControlGains) -> Self {
        Self {
            altitude: AltitudeController::new(
                gains.kp_pos_z,
                gains.kp_vel_z,
                gains.ki_pos_z,
                gains.max_ascent_rate,
                params.mass,
            ),
            lateral: LateralPositionController::new(
                gains.kp_pos_xy,
                gains.kp_vel_xy,
                gains.max_accel_xy,
                gains.max_speed_xy,
            ),
            roll_pitch: RollPitchController::new(
                gains.kp_bank,
                gains.max_tilt_angle,
                params.mass,
            ),
            yaw: YawController::new(gains.kp_yaw),
            body_rate: BodyRateController::new(gains.kp_pqr, params.inertia),
            mixer: MotorMixer::new(params.arm_length, params.kappa),
            min_motor_thrust: gains.min_motor_thrust,
            max_motor_thrust: gains.max_motor_thrust,
        }
    }

    /// Build the cascade with gains loaded from a parameter provider
    ///
    /// Which concrete provider backs the source (config table,
    /// hardware parameter store, ...) is the caller's choice.
    pub fn from_source(
        params: &VehicleParams,
        source: &dyn ParamSource,
        prefix: &str,
    ) -> Self {
        Self::new(params, &ControlGains::load(source, prefix))
    }

    /// Run one control tick
    ///
    /// Fetches the trajectory point for `sim_time`, runs the cascade
    /// and returns exactly one motor command, a pure function of the
    /// inputs plus the altitude integrator.
    pub fn run_control(
        &mut self,
        dt: f64,
        sim_time: f64,
        state: &VehicleState,
        trajectory: &dyn TrajectorySource,
    ) -> MotorCommand {
        let traj = trajectory.point_at(sim_time);

        let coll_thrust_cmd = self.altitude.compute(
            traj.position.z,
            traj.velocity.z,
            state.position.z,
            state.velocity.z,
            &state.orientation,
            traj.acceleration.z,
            dt,
        );

        // Reserve thrust margin so attitude control keeps authority
        // at the ends of the motor range.
        let margin = THRUST_MARGIN_FRACTION * (self.max_motor_thrust - self.min_motor_thrust);
        let coll_thrust_cmd = coll_thrust_cmd.clamp(
            (self.min_motor_thrust + margin) * 4.0,
            (self.max_motor_thrust - margin) * 4.0,
        );

        let accel_cmd = self.lateral.compute(
            &traj.position,
            &traj.velocity,
            &state.position,
            &state.velocity,
            &traj.acceleration,
        );

        let mut pqr_cmd = self
            .roll_pitch
            .compute(&accel_cmd, &state.orientation, coll_thrust_cmd);
        pqr_cmd.z = self.yaw.compute(traj.yaw(), state.yaw());

        let moment_cmd = self.body_rate.compute(&pqr_cmd, &state.angular_velocity);

        self.mixer.compute(coll_thrust_cmd, &moment_cmd)
    }

    /// Reset cross-tick controller state (the altitude integrator)
    pub fn reset(&mut self) {
        self.altitude.reset();
    }
}
