//! Threshold adjustment from free-text requests
//!
//! "squats going too low, decrease it" → `squat_knee_upper_limit` − 5.
//! Matching is deterministic: exercise synonyms by word, the longest
//! condition phrase contained in the text, and a direction word.

use std::fmt;

use tracing::info;

use reptrack_core::{ExerciseKind, RepTrackError, RepTrackResult, SharedThresholds, ThresholdKey};

/// Default change per request, in threshold units
pub const DEFAULT_STEP: f32 = 5.0;

const EXERCISE_SYNONYMS: &[(ExerciseKind, &[&str])] = &[
    (ExerciseKind::Squat, &["squat", "squats", "squatting"]),
    (
        ExerciseKind::BicepCurl,
        &["bicep", "biceps", "curl", "curls"],
    ),
];

/// Condition phrases and the threshold each one controls
const CONDITIONS: &[(ExerciseKind, ThresholdKey, &[&str])] = &[
    (
        ExerciseKind::Squat,
        ThresholdKey::SquatKneeUpperLimit,
        &["too deep", "squat too deep", "going too low", "low"],
    ),
    (
        ExerciseKind::Squat,
        ThresholdKey::SquatKneeLowerLimit,
        &["not deep enough", "not low enough", "too high", "shallow"],
    ),
    (
        ExerciseKind::Squat,
        ThresholdKey::SquatForwardBendTooLittle,
        &["not leaning forward enough", "too upright", "straight"],
    ),
    (
        ExerciseKind::Squat,
        ThresholdKey::SquatForwardBendTooMuch,
        &["leaning too far forward", "bending too much", "leaning"],
    ),
    (
        ExerciseKind::BicepCurl,
        ThresholdKey::CurlDown,
        &["not extending fully", "not going low enough", "high", "not low"],
    ),
    (
        ExerciseKind::BicepCurl,
        ThresholdKey::CurlTop,
        &["not curling high enough", "not bringing weight up enough", "low"],
    ),
    (
        ExerciseKind::BicepCurl,
        ThresholdKey::CurlElbowTorsoMax,
        &["elbow moving too much", "unstable elbow", "elbow"],
    ),
    (
        ExerciseKind::BicepCurl,
        ThresholdKey::CurlBodySwing,
        &["swinging body", "using momentum", "not stable", "swing"],
    ),
];

const INCREASE_WORDS: &[&str] = &["increase", "more", "higher", "up"];
const DECREASE_WORDS: &[&str] = &["decrease", "less", "lower", "down"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

/// A parsed request, not yet applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjustmentRequest {
    pub exercise: ExerciseKind,
    pub key: ThresholdKey,
    pub direction: Direction,
}

/// Parse a free-text request
///
/// The direction defaults to an increase when no direction word is present.
/// A request naming no known condition is rejected.
pub fn parse_request(text: &str) -> RepTrackResult<AdjustmentRequest> {
    let normalized = text.to_lowercase();
    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let cleaned = words.join(" ");
    let padded = format!(" {cleaned} ");

    let exercise = EXERCISE_SYNONYMS
        .iter()
        .find(|(_, synonyms)| words.iter().any(|w| synonyms.contains(w)))
        .map(|(kind, _)| *kind);

    // Longest phrase wins; the first table entry wins a tie
    let mut best: Option<(ExerciseKind, ThresholdKey, usize)> = None;
    for (kind, key, phrases) in CONDITIONS {
        if exercise.is_some_and(|e| e != *kind) {
            continue;
        }
        for phrase in *phrases {
            if padded.contains(&format!(" {phrase} "))
                && best.map_or(true, |(_, _, len)| phrase.len() > len)
            {
                best = Some((*kind, *key, phrase.len()));
            }
        }
    }
    let Some((exercise, key, _)) = best else {
        return Err(RepTrackError::UnrecognizedAdjustment(text.to_string()));
    };

    let has_any = |list: &[&str]| words.iter().any(|w| list.contains(w));
    let direction = if has_any(DECREASE_WORDS) && !has_any(INCREASE_WORDS) {
        Direction::Decrease
    } else {
        Direction::Increase
    };

    Ok(AdjustmentRequest {
        exercise,
        key,
        direction,
    })
}

/// An applied adjustment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Adjustment {
    pub request: AdjustmentRequest,
    pub old: f32,
    pub new: f32,
    /// Threshold version published by the change
    pub version: u64,
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Adjusted {} from {} to {} degrees.",
            self.request.key, self.old, self.new
        )
    }
}

/// Applies parsed requests to a shared threshold set
#[derive(Clone, Debug)]
pub struct ThresholdAdjuster {
    thresholds: SharedThresholds,
    step: f32,
}

impl ThresholdAdjuster {
    pub fn new(thresholds: SharedThresholds) -> Self {
        Self::with_step(thresholds, DEFAULT_STEP)
    }

    pub fn with_step(thresholds: SharedThresholds, step: f32) -> Self {
        ThresholdAdjuster { thresholds, step }
    }

    /// Parse and apply; returns what changed
    pub fn adjust(&self, text: &str) -> RepTrackResult<Adjustment> {
        let request = parse_request(text)?;
        self.apply(request)
    }

    pub fn apply(&self, request: AdjustmentRequest) -> RepTrackResult<Adjustment> {
        let delta = match request.direction {
            Direction::Increase => self.step,
            Direction::Decrease => -self.step,
        };

        let mut change = (0.0, 0.0);
        let version = self.thresholds.update(|t| {
            let old = t.get(request.key);
            t.set(request.key, old + delta)?;
            change = (old, old + delta);
            Ok(())
        })?;

        let adjustment = Adjustment {
            request,
            old: change.0,
            new: change.1,
            version,
        };
        info!(key = %request.key, old = adjustment.old, new = adjustment.new, version, "threshold adjusted");
        Ok(adjustment)
    }
}
