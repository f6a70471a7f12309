//! Per-frame output and the end-of-session summary

use serde::Serialize;

use reptrack_core::ExerciseKind;

use crate::ProgressReport;

/// State of the active exercise after one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExerciseReport {
    pub kind: ExerciseKind,
    pub rep_count: u32,
    pub phase: &'static str,
    /// Zero or one message
    pub feedback: Vec<String>,
}

/// Everything the presentation layer needs after one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    /// `None` when no exercise is selected or the name is not recognized
    pub exercise: Option<ExerciseReport>,
    pub posture_good: bool,
    pub progress: Option<ProgressReport>,
    /// Progress cues raised on this frame, in order
    pub announcements: Vec<String>,
    pub score: u32,
}

/// Session totals
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub frames: u64,
    pub squat_reps: u32,
    pub curl_reps: u32,
    pub good_posture_seconds: f32,
    pub bad_posture_seconds: f32,
    pub exercises_completed: usize,
    pub score: u32,
    pub mistakes_report: String,
}
