//! Form cues - the closed set of observations the analyzers can make

use reptrack_core::{Diagnostic, ExerciseKind, Priority};

/// How hard the body is swinging
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwingSeverity {
    Slight,
    Excessive,
}

/// Mistake category used in session reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MistakeCategory {
    IncorrectForm,
    WrongDepth,
    WrongWeight,
    Other,
}

impl MistakeCategory {
    /// Categories reported for an exercise, in report order
    pub fn for_exercise(kind: ExerciseKind) -> &'static [MistakeCategory] {
        match kind {
            ExerciseKind::Squat => &[
                MistakeCategory::IncorrectForm,
                MistakeCategory::WrongDepth,
                MistakeCategory::Other,
            ],
            ExerciseKind::BicepCurl => &[
                MistakeCategory::IncorrectForm,
                MistakeCategory::WrongWeight,
                MistakeCategory::Other,
            ],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MistakeCategory::IncorrectForm => "Incorrect Form",
            MistakeCategory::WrongDepth => "Wrong Depth",
            MistakeCategory::WrongWeight => "Wrong Weight",
            MistakeCategory::Other => "Other",
        }
    }
}

/// A single observation from a form analyzer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormCue {
    // Squat
    BendForwardMore,
    ForwardBendTooMuch,
    LowerHips,
    TooDeep,
    SquatCorrect,

    // Bicep curl
    UpperArmDrift,
    ElbowDrift,
    BodySwing(SwingSeverity),
    ElbowTravel,
    ElbowUntracked,
    CurlCorrect,
}

impl FormCue {
    pub fn message(self) -> &'static str {
        match self {
            FormCue::BendForwardMore => "Bend forward more",
            FormCue::ForwardBendTooMuch => "Forward bending too much",
            FormCue::LowerHips => "Lower your hips",
            FormCue::TooDeep => "Don't squat too deep",
            FormCue::SquatCorrect => "Correct form",
            FormCue::UpperArmDrift => "Keep your upper arm still",
            FormCue::ElbowDrift => "Keep your elbow in place",
            FormCue::BodySwing(SwingSeverity::Slight) => {
                "Your body is slightly swinging. Keep your body stable."
            }
            FormCue::BodySwing(SwingSeverity::Excessive) => {
                "Your body is excessively swinging. Keep your body stable."
            }
            FormCue::ElbowTravel => "Keep your upper arm still, excessive elbow movement",
            FormCue::ElbowUntracked => "Unable to detect elbow movement accurately",
            FormCue::CurlCorrect => "Correct form, keep it up",
        }
    }

    /// Positive confirmation rather than a complaint
    pub fn is_positive(self) -> bool {
        matches!(self, FormCue::SquatCorrect | FormCue::CurlCorrect)
    }

    /// A form fault: counts against the current rep
    pub fn is_fault(self) -> bool {
        !self.is_positive() && self != FormCue::ElbowUntracked
    }

    pub fn priority(self) -> Priority {
        if self.is_positive() {
            Priority::Low
        } else if self.is_fault() {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    /// Report category; positive cues have none
    pub fn category(self) -> Option<MistakeCategory> {
        match self {
            FormCue::SquatCorrect | FormCue::CurlCorrect => None,
            FormCue::BendForwardMore
            | FormCue::ForwardBendTooMuch
            | FormCue::UpperArmDrift
            | FormCue::ElbowDrift
            | FormCue::ElbowTravel => Some(MistakeCategory::IncorrectForm),
            FormCue::LowerHips | FormCue::TooDeep => Some(MistakeCategory::WrongDepth),
            // Swinging means momentum is doing the work
            FormCue::BodySwing(_) => Some(MistakeCategory::WrongWeight),
            FormCue::ElbowUntracked => Some(MistakeCategory::Other),
        }
    }

    pub fn diagnostic(self) -> Diagnostic {
        Diagnostic::new(self.message(), self.priority())
    }
}
