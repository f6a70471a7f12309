//! RepTrack Posture - Continuous posture monitoring
//!
//! Runs on every frame regardless of the selected exercise or its phase.

pub mod inclination;
pub mod monitor;

pub use inclination::*;
pub use monitor::*;
