//! Squat form analysis
//!
//! Stateless: the caller decides when to run it (the bottom of the rep and
//! the return to standing) and supplies the angles to judge.

use reptrack_core::{ThresholdKey, Thresholds};

use crate::FormCue;

/// Check back and knee angles against the squat cutoffs
///
/// Nothing is reported while the knee is above the start cutoff: the user is
/// standing between reps. Each group (back, knee) reports at most one cue;
/// when neither group fires the squat is confirmed as correct.
pub fn analyze_squat(back_angle: f32, knee_angle: f32, thresholds: &Thresholds) -> Vec<FormCue> {
    if knee_angle >= thresholds.get(ThresholdKey::SquatStart) {
        return Vec::new();
    }

    let mut cues = Vec::with_capacity(2);

    if back_angle < thresholds.get(ThresholdKey::SquatForwardBendTooLittle) {
        cues.push(FormCue::BendForwardMore);
    } else if back_angle > thresholds.get(ThresholdKey::SquatForwardBendTooMuch) {
        cues.push(FormCue::ForwardBendTooMuch);
    }

    if knee_angle < thresholds.get(ThresholdKey::SquatKneeLowerLimit) {
        cues.push(FormCue::LowerHips);
    } else if knee_angle >= thresholds.get(ThresholdKey::SquatKneeUpperLimit) {
        cues.push(FormCue::TooDeep);
    }

    if cues.is_empty() {
        cues.push(FormCue::SquatCorrect);
    }
    cues
}
