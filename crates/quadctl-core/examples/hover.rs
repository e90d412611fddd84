//! Hover Demonstration
//!
//! Drives the control cascade against a fixed hover reference with a
//! crude kinematic update of the vehicle state, printing the motor
//! commands as the vehicle settles.

use nalgebra::{UnitQuaternion, Vector3};

use quadctl_core::config::ParamTable;
use quadctl_core::control::CascadeController;
use quadctl_core::trajectory::HoverReference;
use quadctl_core::vehicle::{VehicleParams, VehicleState};
use quadctl_core::GRAVITY;

fn main() {
    println!("=== quadctl hover demonstration ===\n");

    let table = ParamTable::parse(
        "Quad.kpPosXY = 25\n\
         Quad.kpPosZ = 20\n\
         Quad.KiPosZ = 30\n\
         Quad.kpVelXY = 10\n\
         Quad.kpVelZ = 8\n\
         Quad.kpBank = 12\n\
         Quad.kpYaw = 3\n\
         Quad.kpPQR = 92, 92, 6\n\
         Quad.maxAscentRate = 5\n\
         Quad.maxDescentRate = 2\n\
         Quad.maxSpeedXY = 5\n\
         Quad.maxHorizAccel = 12\n\
         Quad.maxTiltAngle = 0.7\n\
         Quad.minMotorThrust = 0.1\n\
         Quad.maxMotorThrust = 4.5\n",
    )
    .expect("gain table parses");

    let params = VehicleParams::default();
    let mut cascade = CascadeController::from_source(&params, &table, "Quad");

    // Hold 1 m above the origin (NED: up is -z).
    let hover = HoverReference::new(Vector3::new(0.0, 0.0, -1.0), UnitQuaternion::identity());

    // Start half a meter below the hold point.
    let mut state = VehicleState {
        position: Vector3::new(0.0, 0.0, -0.5),
        ..Default::default()
    };

    let dt = 0.01;
    println!("tick     z [m]   vz [m/s]   motors [N] (FL FR RL RR)");

    for tick in 0..300 {
        let sim_time = tick as f64 * dt;
        let cmd = cascade.run_control(dt, sim_time, &state, &hover);

        // Vertical-only point-mass update; attitude stays level, so
        // the collective acts straight up.
        let accel_z = GRAVITY - cmd.collective() / params.mass;
        state.velocity.z += accel_z * dt;
        state.position.z += state.velocity.z * dt;

        if tick % 50 == 0 {
            let m = cmd.to_array();
            println!(
                "{:4}  {:8.3}  {:8.3}   {:.3} {:.3} {:.3} {:.3}",
                tick, state.position.z, state.velocity.z, m[0], m[1], m[2], m[3]
            );
        }
    }

    println!(
        "\nfinal altitude error: {:.4} m",
        (state.position.z - (-1.0)).abs()
    );
}
