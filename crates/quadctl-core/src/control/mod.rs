//! Control laws for the quadrotor cascade
//!
//! One module per loop, outer to inner:
//! - Lateral position / altitude controllers (outer)
//! - Roll-pitch and yaw controllers (middle)
//! - Body-rate controller (inner)
//! - Motor mixer (allocation)
//! - Cascade orchestrator running all of them once per tick

pub mod altitude;
pub mod attitude;
pub mod body_rate;
pub mod cascade;
pub mod lateral;
pub mod mixer;
pub mod yaw;

pub use altitude::*;
pub use attitude::*;
pub use body_rate::*;
pub use cascade::*;
pub use lateral::*;
pub use mixer::*;
pub use yaw::*;
