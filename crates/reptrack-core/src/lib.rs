//! RepTrack Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the frame pipeline:
//! - Landmarks and the pose-estimator body-part layout
//! - The geometry kernel (angles, inclinations, distances)
//! - Diagnostics and their priorities
//! - Runtime-tunable thresholds
//! - Exercise descriptors and frame time

pub mod landmark;
pub mod geometry;
pub mod diagnostic;
pub mod threshold;
pub mod exercise;
pub mod time;
pub mod error;

pub use landmark::*;
pub use geometry::*;
pub use diagnostic::*;
pub use threshold::*;
pub use exercise::*;
pub use time::*;
pub use error::*;
