//! RepTrack Phase - Exercise phase machines
//!
//! Each exercise family advances a small cyclic state machine from one
//! smoothed joint angle per frame:
//! - Transitions are pure functions of (phase, angle, previous angle)
//! - Exactly one transition edge per cycle completes a rep
//! - The machine keeps a single scalar of history

pub mod counter;
pub mod phase;
pub mod machine;

pub use counter::*;
pub use phase::*;
pub use machine::*;
