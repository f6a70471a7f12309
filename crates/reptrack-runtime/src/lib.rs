//! RepTrack Runtime - Session pipeline and its surroundings
//!
//! Per frame, `Session::process_frame` derives joint angles, judges posture,
//! drives the selected exercise's phase machine and form analysis, and
//! returns a snapshot for the presentation layer. Around it:
//! - Engine configuration and threshold persistence
//! - Free-text threshold adjustment
//! - Workout plan and progress tracking
//! - A queue-fed frame worker
//! - Logging setup

pub mod signals;
pub mod tracker;
pub mod progress;
pub mod plan;
pub mod snapshot;
pub mod session;
pub mod config;
pub mod adjust;
pub mod worker;
pub mod telemetry;

#[cfg(test)]
mod fixtures;

pub use signals::*;
pub use tracker::*;
pub use progress::*;
pub use plan::*;
pub use snapshot::*;
pub use session::*;
pub use config::*;
pub use adjust::*;
pub use worker::*;
pub use telemetry::*;
