//! RepTrack Test Harness - synthetic poses and end-to-end scenarios
//!
//! This crate provides:
//! - A skeleton builder for full 33-landmark frames
//! - Squat and curl rep generators with form faults
//! - Estimator noise: jitter, landmark dropout, lost frames
//! - A scenario runner over the session pipeline

pub mod noise;
pub mod scenario;
pub mod simulator;
pub mod skeleton;

pub use noise::*;
pub use scenario::*;
pub use simulator::*;
pub use skeleton::*;
