//! Mistake tracking for the end-of-session report

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use reptrack_core::ExerciseKind;

use crate::{FormCue, MistakeCategory};

/// Counts form faults per exercise and category
///
/// A cue is counted at most once per rep: curl faults repeat on every frame
/// while the fault persists.
#[derive(Clone, Debug, Default)]
pub struct MistakeTracker {
    counts: BTreeMap<(ExerciseKind, MistakeCategory), u32>,
    seen_this_rep: HashSet<(ExerciseKind, FormCue)>,
}

impl MistakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget which cues were already counted for `kind`'s current rep
    pub fn begin_rep(&mut self, kind: ExerciseKind) {
        self.seen_this_rep.retain(|(k, _)| *k != kind);
    }

    /// Count a cue; returns true if it was new for this rep
    pub fn record(&mut self, kind: ExerciseKind, cue: FormCue) -> bool {
        let Some(category) = cue.category() else {
            return false;
        };
        if !self.seen_this_rep.insert((kind, cue)) {
            return false;
        }
        *self.counts.entry((kind, category)).or_insert(0) += 1;
        true
    }

    pub fn count(&self, kind: ExerciseKind, category: MistakeCategory) -> u32 {
        self.counts.get(&(kind, category)).copied().unwrap_or(0)
    }

    pub fn total(&self, kind: ExerciseKind) -> u32 {
        self.counts
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, n)| *n)
            .sum()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.seen_this_rep.clear();
    }

    /// Plain-text report, one section per exercise
    pub fn report(&self) -> String {
        let mut out = String::from("Exercise Mistakes Report\n");
        for kind in [ExerciseKind::BicepCurl, ExerciseKind::Squat] {
            let _ = write!(out, "\n{} MISTAKES:\n", kind.name().to_uppercase());
            for category in MistakeCategory::for_exercise(kind) {
                let _ = writeln!(out, "  - {}: {}", category.title(), self.count(kind, *category));
            }
        }
        out
    }
}
