//! Exercise descriptors supplied by the caller

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exercise families the engine can track
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    Squat,
    BicepCurl,
}

impl ExerciseKind {
    /// Resolve a caller-provided name, case-insensitively
    ///
    /// Anything unrecognized disables phase/rep tracking for that exercise.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "squat" => Some(ExerciseKind::Squat),
            "bicep curl" | "curl" => Some(ExerciseKind::BicepCurl),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::BicepCurl => "bicep_curl",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The exercise currently selected in the workout plan
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDescriptor {
    pub name: String,
    pub sets: u32,
    /// Reps per set, or seconds for a timed exercise
    pub reps: u32,
    pub is_timed: bool,
}

impl ExerciseDescriptor {
    pub fn new(name: impl Into<String>, sets: u32, reps: u32) -> Self {
        ExerciseDescriptor {
            name: name.into(),
            sets,
            reps,
            is_timed: false,
        }
    }

    pub fn timed(name: impl Into<String>, seconds: u32) -> Self {
        ExerciseDescriptor {
            name: name.into(),
            sets: 1,
            reps: seconds,
            is_timed: true,
        }
    }

    pub fn kind(&self) -> Option<ExerciseKind> {
        ExerciseKind::from_name(&self.name)
    }

    /// Total reps across all sets
    pub fn target_reps(&self) -> u32 {
        self.reps.saturating_mul(self.sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ExerciseKind::from_name("Squat"), Some(ExerciseKind::Squat));
        assert_eq!(ExerciseKind::from_name("BICEP CURL"), Some(ExerciseKind::BicepCurl));
        assert_eq!(ExerciseKind::from_name(" curl "), Some(ExerciseKind::BicepCurl));
        assert_eq!(ExerciseKind::from_name("Lunge"), None);
        assert_eq!(ExerciseKind::from_name(""), None);
    }

    #[test]
    fn test_target_reps() {
        let ex = ExerciseDescriptor::new("squat", 3, 10);
        assert_eq!(ex.target_reps(), 30);
        assert_eq!(ex.kind(), Some(ExerciseKind::Squat));
        assert!(ExerciseDescriptor::timed("plank", 60).is_timed);
    }
}
