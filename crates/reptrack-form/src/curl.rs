//! Bicep curl form analysis
//!
//! Unlike the squat check, curl analysis is rep-local: positions and angles
//! captured at the start of the rep are the reference for every later frame.

use tracing::trace;

use reptrack_core::{distance, Landmark, Point, ThresholdKey, Thresholds};

use crate::{FormCue, MovingAverage, SwingSeverity};

/// Consecutive frames without an elbow-torso angle before reporting it
pub const DEFAULT_LOW_CONFIDENCE_FRAMES: u32 = 8;

/// Everything the curl analyzer reads from one frame, for the active arm
#[derive(Clone, Copy, Debug)]
pub struct CurlSample {
    pub shoulder: Landmark,
    pub elbow: Landmark,
    pub wrist: Landmark,
    /// Shoulder-elbow-wrist angle
    pub bicep_angle: f32,
    /// Hip-shoulder-elbow angle; `None` when the arm is not visible
    pub elbow_torso_angle: Option<f32>,
    /// Torso inclination; `None` when hip or shoulder is not visible
    pub hip_shoulder_angle: Option<f32>,
}

/// Trust in the elbow-torso angle, in [0, 1]
///
/// The weakest visibility of shoulder, elbow and wrist, scaled by how far the
/// elbow sits from the shoulder relative to the whole arm.
pub fn elbow_confidence(shoulder: &Landmark, elbow: &Landmark, wrist: &Landmark) -> f32 {
    let visibility = shoulder
        .visibility
        .min(elbow.visibility)
        .min(wrist.visibility);

    let shoulder_wrist = distance(shoulder.point(), wrist.point());
    if shoulder_wrist == 0.0 {
        return 0.0;
    }
    let ratio = distance(shoulder.point(), elbow.point()) / shoulder_wrist;
    visibility * (1.0 - ratio).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug)]
struct RepStart {
    shoulder: Point,
    elbow: Point,
    hip_shoulder_angle: Option<f32>,
}

/// Rep-local curl form analyzer
#[derive(Clone, Debug)]
pub struct CurlAnalyzer {
    start: Option<RepStart>,
    elbow_smoothing: MovingAverage,
    max_elbow_angle: f32,
    max_swing: f32,
    max_angle: f32,
    min_angle: f32,
    last_angle: Option<f32>,
    untracked_frames: u32,
    low_confidence_frames: u32,
}

impl CurlAnalyzer {
    pub fn new(smoothing_window: usize, low_confidence_frames: u32) -> Self {
        CurlAnalyzer {
            start: None,
            elbow_smoothing: MovingAverage::new(smoothing_window),
            max_elbow_angle: 0.0,
            max_swing: 0.0,
            max_angle: 0.0,
            min_angle: 180.0,
            last_angle: None,
            untracked_frames: 0,
            low_confidence_frames: low_confidence_frames.max(1),
        }
    }

    /// Capture the reference pose and clear all rep-local state
    pub fn begin_rep(&mut self, sample: &CurlSample) {
        self.start = Some(RepStart {
            shoulder: sample.shoulder.point(),
            elbow: sample.elbow.point(),
            hip_shoulder_angle: sample.hip_shoulder_angle,
        });
        self.elbow_smoothing.clear();
        self.max_elbow_angle = 0.0;
        self.max_swing = 0.0;
        self.max_angle = 0.0;
        self.min_angle = 180.0;
        self.last_angle = Some(sample.bicep_angle);
        self.untracked_frames = 0;
    }

    pub fn in_rep(&self) -> bool {
        self.start.is_some()
    }

    /// Largest bicep-angle amplitude seen in the current rep
    pub fn amplitude(&self) -> f32 {
        (self.max_angle - self.min_angle).max(0.0)
    }

    /// Evaluate one frame of the current rep
    ///
    /// Without a captured start pose the sample becomes the start pose and
    /// nothing is reported.
    pub fn evaluate(&mut self, sample: &CurlSample, thresholds: &Thresholds) -> Vec<FormCue> {
        let Some(start) = self.start else {
            self.begin_rep(sample);
            return Vec::new();
        };

        let mut cues = Vec::new();

        if distance(sample.shoulder.point(), start.shoulder)
            > thresholds.get(ThresholdKey::CurlShoulderMovement)
        {
            cues.push(FormCue::UpperArmDrift);
        }
        if distance(sample.elbow.point(), start.elbow)
            > thresholds.get(ThresholdKey::CurlElbowMovement)
        {
            cues.push(FormCue::ElbowDrift);
        }

        if let Some(cue) = self.check_swing(sample, start, thresholds) {
            cues.push(cue);
        }
        if let Some(cue) = self.check_elbow_travel(sample, thresholds) {
            cues.push(cue);
        }

        self.track_amplitude(sample.bicep_angle, thresholds);

        let fault = cues.iter().any(|c| c.is_fault());
        if !fault && self.amplitude() > thresholds.get(ThresholdKey::CurlCompletionAmplitude) {
            cues.push(FormCue::CurlCorrect);
        }

        if !cues.is_empty() {
            trace!(?cues, angle = sample.bicep_angle, "curl cues");
        }
        cues
    }

    fn check_swing(
        &mut self,
        sample: &CurlSample,
        start: RepStart,
        thresholds: &Thresholds,
    ) -> Option<FormCue> {
        let (now, at_start) = (sample.hip_shoulder_angle?, start.hip_shoulder_angle?);
        let swing = (now - at_start).abs();
        self.max_swing = self.max_swing.max(swing);

        if swing <= thresholds.get(ThresholdKey::CurlBodySwing) {
            return None;
        }
        let severity = if self.max_swing <= thresholds.get(ThresholdKey::CurlSwingSeverity) {
            SwingSeverity::Slight
        } else {
            SwingSeverity::Excessive
        };
        Some(FormCue::BodySwing(severity))
    }

    fn check_elbow_travel(&mut self, sample: &CurlSample, thresholds: &Thresholds) -> Option<FormCue> {
        match sample.elbow_torso_angle {
            Some(angle) => {
                self.untracked_frames = 0;
                let smoothed = self.elbow_smoothing.push(angle);
                self.max_elbow_angle = self.max_elbow_angle.max(smoothed);

                let confidence = elbow_confidence(&sample.shoulder, &sample.elbow, &sample.wrist);
                let travelled = self.max_elbow_angle > thresholds.get(ThresholdKey::CurlElbowTorsoMax);
                (travelled && confidence > thresholds.get(ThresholdKey::CurlElbowConfidence))
                    .then_some(FormCue::ElbowTravel)
            }
            None => {
                self.untracked_frames = self.untracked_frames.saturating_add(1);
                // Once per streak
                (self.untracked_frames == self.low_confidence_frames)
                    .then_some(FormCue::ElbowUntracked)
            }
        }
    }

    fn track_amplitude(&mut self, angle: f32, thresholds: &Thresholds) {
        // A jump from contracted to extended in one step is a fresh rep
        if let Some(last) = self.last_angle {
            if last < thresholds.get(ThresholdKey::CurlTop)
                && angle > thresholds.get(ThresholdKey::CurlStart)
            {
                self.max_angle = angle;
                self.min_angle = angle;
            }
        }
        self.max_angle = self.max_angle.max(angle);
        self.min_angle = self.min_angle.min(angle);
        self.last_angle = Some(angle);
    }
}

impl Default for CurlAnalyzer {
    fn default() -> Self {
        Self::new(MovingAverage::DEFAULT_CAPACITY, DEFAULT_LOW_CONFIDENCE_FRAMES)
    }
}
