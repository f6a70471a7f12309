//! Error types for RepTrack
//!
//! Per-frame processing never fails: missing landmarks and degenerate
//! geometry travel as `None`. These errors cover the fallible edges only.

use thiserror::Error;

/// Core RepTrack errors
#[derive(Error, Debug)]
pub enum RepTrackError {
    // Input errors
    #[error("Invalid landmark frame: expected {expected} values, got {actual}")]
    InvalidFrameLength { expected: usize, actual: usize },

    // Threshold errors
    #[error("Unknown threshold key: {0}")]
    UnknownThreshold(String),

    #[error("Threshold {key} must be finite, got {value}")]
    InvalidThresholdValue { key: String, value: f32 },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration format error: {0}")]
    Format(#[from] serde_json::Error),

    // Adjustment errors
    #[error("Could not interpret adjustment request: {0}")]
    UnrecognizedAdjustment(String),

    // Worker errors
    #[error("Frame worker stopped")]
    WorkerStopped,
}

/// Result type for RepTrack operations
pub type RepTrackResult<T> = Result<T, RepTrackError>;
