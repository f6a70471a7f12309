//! Exercise trackers - phase machine, form analysis and feedback per exercise

use tracing::{debug, trace};

use reptrack_core::{ExerciseKind, FrameIndex, LandmarkFrame, Side, Thresholds};
use reptrack_form::{analyze_squat, CurlAnalyzer, CurlSample, FeedbackAggregator, FormCue};
use reptrack_phase::{CurlPhase, PhaseCycle, PhaseMachine, SquatPhase};

use crate::FrameSignals;

/// What one frame did to a tracker
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerUpdate {
    /// A new rep began on this frame
    pub rep_started: bool,
    pub rep_completed: bool,
    /// Cues forwarded to the feedback window
    pub cues: Vec<FormCue>,
}

/// Per-exercise state driven once per frame
pub trait ExerciseTracker: Send {
    fn kind(&self) -> ExerciseKind;

    fn update(
        &mut self,
        frame: &LandmarkFrame,
        signals: &FrameSignals,
        thresholds: &Thresholds,
        index: FrameIndex,
    ) -> TrackerUpdate;

    fn reps(&self) -> u32;

    fn phase_name(&self) -> &'static str;

    /// Message list for the presentation layer
    fn feedback(&self) -> Vec<String>;

    /// Back to Idle with an empty feedback window; reps are kept
    fn reset_phase(&mut self);
}

/// Squat: knee angle drives the machine, form is checked at the bottom
#[derive(Clone, Debug)]
pub struct SquatTracker {
    machine: PhaseMachine<SquatPhase>,
    feedback: FeedbackAggregator,
}

impl SquatTracker {
    pub fn new(feedback_window: usize) -> Self {
        SquatTracker {
            machine: PhaseMachine::new(),
            feedback: FeedbackAggregator::new(feedback_window),
        }
    }

    pub fn phase(&self) -> SquatPhase {
        self.machine.phase()
    }
}

impl ExerciseTracker for SquatTracker {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::Squat
    }

    fn update(
        &mut self,
        _frame: &LandmarkFrame,
        signals: &FrameSignals,
        thresholds: &Thresholds,
        index: FrameIndex,
    ) -> TrackerUpdate {
        let knee = signals.knee_angle();
        let held = self.machine.previous_angle();
        let transition = self.machine.update(knee, &SquatPhase::limits(thresholds));

        // Standing between reps: nothing from the last rep stays on screen
        if self.machine.is_idle() {
            self.feedback.clear();
        }

        let mut update = TrackerUpdate {
            rep_started: transition.is(SquatPhase::Idle, SquatPhase::Start),
            rep_completed: transition.rep_completed,
            cues: Vec::new(),
        };

        // At the bottom edge the current sample is already rising; judge the held minimum
        let judged = if transition.is(SquatPhase::Down, SquatPhase::Hold) {
            Some(held)
        } else if transition.rep_completed {
            knee
        } else {
            None
        };
        if let (Some(back), Some(knee)) = (signals.back_angle(), judged) {
            update.cues = analyze_squat(back, knee, thresholds);
        }
        for cue in &update.cues {
            trace!(frame = index.value(), cue = cue.message(), "squat cue");
            self.feedback.ingest(cue.diagnostic());
        }
        update
    }

    fn reps(&self) -> u32 {
        self.machine.reps()
    }

    fn phase_name(&self) -> &'static str {
        self.machine.phase().name()
    }

    fn feedback(&self) -> Vec<String> {
        self.feedback.current_feedback()
    }

    fn reset_phase(&mut self) {
        self.machine.reset_phase();
        self.feedback.clear();
    }
}

/// Bicep curl: the more contracted arm drives the machine
#[derive(Clone, Debug)]
pub struct CurlTracker {
    machine: PhaseMachine<CurlPhase>,
    analyzer: CurlAnalyzer,
    feedback: FeedbackAggregator,
    /// A fault fired during the current rep
    rep_error: bool,
    active_arm: Option<Side>,
}

impl CurlTracker {
    pub fn new(feedback_window: usize, elbow_smoothing: usize, low_confidence_frames: u32) -> Self {
        CurlTracker {
            machine: PhaseMachine::new(),
            analyzer: CurlAnalyzer::new(elbow_smoothing, low_confidence_frames),
            feedback: FeedbackAggregator::new(feedback_window),
            rep_error: false,
            active_arm: None,
        }
    }

    pub fn phase(&self) -> CurlPhase {
        self.machine.phase()
    }

    pub fn active_arm(&self) -> Option<Side> {
        self.active_arm
    }

    pub fn rep_error(&self) -> bool {
        self.rep_error
    }

    fn sample(frame: &LandmarkFrame, signals: &FrameSignals, side: Side, angle: f32) -> CurlSample {
        CurlSample {
            shoulder: *frame.get(side.shoulder()),
            elbow: *frame.get(side.elbow()),
            wrist: *frame.get(side.wrist()),
            bicep_angle: angle,
            elbow_torso_angle: signals.elbow_torso.side(side),
            hip_shoulder_angle: signals.hip_shoulder,
        }
    }
}

impl ExerciseTracker for CurlTracker {
    fn kind(&self) -> ExerciseKind {
        ExerciseKind::BicepCurl
    }

    fn update(
        &mut self,
        frame: &LandmarkFrame,
        signals: &FrameSignals,
        thresholds: &Thresholds,
        index: FrameIndex,
    ) -> TrackerUpdate {
        let limits = CurlPhase::limits(thresholds);
        let Some((side, angle)) = signals.active_arm() else {
            self.machine.update(None, &limits);
            return TrackerUpdate::default();
        };
        if self.active_arm != Some(side) {
            debug!(?side, "active arm");
            self.active_arm = Some(side);
        }

        let sample = Self::sample(frame, signals, side, angle);
        let was_idle = self.machine.is_idle();
        let transition = self.machine.update(Some(angle), &limits);

        if transition.is(CurlPhase::Idle, CurlPhase::Start) {
            self.analyzer.begin_rep(&sample);
            self.rep_error = false;
            self.feedback.clear();
            return TrackerUpdate {
                rep_started: true,
                ..TrackerUpdate::default()
            };
        }

        let mut update = TrackerUpdate {
            rep_started: false,
            rep_completed: transition.rep_completed,
            cues: Vec::new(),
        };
        if was_idle {
            return update;
        }

        for cue in self.analyzer.evaluate(&sample, thresholds) {
            if cue.is_fault() {
                self.rep_error = true;
            } else if cue.is_positive() && self.rep_error {
                continue;
            }
            trace!(frame = index.value(), cue = cue.message(), "curl cue");
            self.feedback.ingest(cue.diagnostic());
            update.cues.push(cue);
        }
        update
    }

    fn reps(&self) -> u32 {
        self.machine.reps()
    }

    fn phase_name(&self) -> &'static str {
        self.machine.phase().name()
    }

    fn feedback(&self) -> Vec<String> {
        self.feedback.current_feedback()
    }

    fn reset_phase(&mut self) {
        self.machine.reset_phase();
        self.feedback.clear();
        self.rep_error = false;
    }
}
