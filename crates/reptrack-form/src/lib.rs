//! RepTrack Form - Form analysis and feedback aggregation
//!
//! Analyzers compare joint geometry against the current thresholds and
//! emit cues; the aggregator turns the noisy per-frame cues into one stable
//! message per exercise.

pub mod cue;
pub mod smoothing;
pub mod squat;
pub mod curl;
pub mod aggregator;
pub mod mistakes;

pub use cue::*;
pub use smoothing::*;
pub use squat::*;
pub use curl::*;
pub use aggregator::*;
pub use mistakes::*;
