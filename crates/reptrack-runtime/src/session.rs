//! Session - the per-frame pipeline
//!
//! One `process_frame` call runs every stage to completion:
//! 1. Snapshot the thresholds
//! 2. Derive angles from the landmarks
//! 3. Judge posture
//! 4. Drive the selected exercise's tracker
//! 5. Record mistakes
//! 6. Update progress and advance the plan
//! 7. Assemble the snapshot

use std::time::{Duration, Instant};

use tracing::{info, trace, warn};

use reptrack_core::{
    ExerciseDescriptor, ExerciseKind, FrameIndex, FrameRate, LandmarkFrame, RepTrackResult,
    SharedThresholds, ThresholdKey,
};
use reptrack_form::MistakeTracker;
use reptrack_posture::PostureMonitor;

use crate::{
    CurlTracker, EngineConfig, ExerciseProgress, ExerciseReport, ExerciseTracker, FrameSignals,
    FrameSnapshot, ProgressCue, SessionSummary, SquatTracker, TrackerUpdate, WorkoutPlan,
};

#[derive(Clone, Debug, Default)]
pub struct SessionStats {
    pub frames: u64,
    pub frames_rejected: u64,
    /// Frames where the selected exercise's angle could not be measured
    pub frames_without_angle: u64,
    pub last_frame_duration: Duration,
}

/// One user's workout session
pub struct Session {
    config: EngineConfig,
    frame_rate: FrameRate,
    thresholds: SharedThresholds,
    squat: SquatTracker,
    curl: CurlTracker,
    posture: PostureMonitor,
    plan: WorkoutPlan,
    progress: Option<ExerciseProgress>,
    mistakes: MistakeTracker,
    frame: FrameIndex,
    stats: SessionStats,
}

impl Session {
    /// Session with thresholds built from the config
    pub fn new(config: EngineConfig) -> RepTrackResult<Self> {
        let thresholds = SharedThresholds::new(config.thresholds()?);
        Self::with_thresholds(config, thresholds)
    }

    /// Session reading from an existing threshold handle
    pub fn with_thresholds(config: EngineConfig, thresholds: SharedThresholds) -> RepTrackResult<Self> {
        config.validate()?;
        let frame_rate = config.frame_rate();
        Ok(Session {
            squat: SquatTracker::new(config.feedback_window),
            curl: CurlTracker::new(
                config.feedback_window,
                config.elbow_smoothing,
                config.low_confidence_frames,
            ),
            posture: PostureMonitor::new(frame_rate),
            plan: WorkoutPlan::default(),
            progress: None,
            mistakes: MistakeTracker::new(),
            frame: FrameIndex::ZERO,
            stats: SessionStats::default(),
            frame_rate,
            thresholds,
            config,
        })
    }

    /// Handle for adjusting thresholds between frames
    pub fn thresholds(&self) -> &SharedThresholds {
        &self.thresholds
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the workout plan and start at its first exercise
    pub fn set_plan(&mut self, exercises: Vec<ExerciseDescriptor>) {
        self.plan = WorkoutPlan::new(exercises);
        self.start_current();
    }

    /// Work on a single exercise
    pub fn select_exercise(&mut self, descriptor: ExerciseDescriptor) {
        self.set_plan(vec![descriptor]);
    }

    /// Drop the current exercise without credit
    pub fn skip_exercise(&mut self) {
        self.plan.skip();
        self.start_current();
    }

    pub fn current_exercise(&self) -> Option<&ExerciseDescriptor> {
        self.plan.current()
    }

    fn start_current(&mut self) {
        self.squat.reset_phase();
        self.curl.reset_phase();
        self.progress = self.plan.current().cloned().map(|descriptor| {
            match descriptor.kind() {
                Some(kind) => info!(exercise = %descriptor.name, %kind, "exercise selected"),
                None => warn!(
                    exercise = %descriptor.name,
                    "unrecognized exercise, tracking posture only"
                ),
            }
            ExerciseProgress::new(descriptor)
        });
    }

    fn tracker_mut(&mut self, kind: ExerciseKind) -> &mut dyn ExerciseTracker {
        match kind {
            ExerciseKind::Squat => &mut self.squat,
            ExerciseKind::BicepCurl => &mut self.curl,
        }
    }

    fn tracker(&self, kind: ExerciseKind) -> &dyn ExerciseTracker {
        match kind {
            ExerciseKind::Squat => &self.squat,
            ExerciseKind::BicepCurl => &self.curl,
        }
    }

    /// Parse a flat `[x, y, z, visibility] * 33` frame and process it
    pub fn process_flat(&mut self, data: &[f32]) -> RepTrackResult<FrameSnapshot> {
        match LandmarkFrame::from_flat(data) {
            Ok(frame) => Ok(self.process_frame(&frame)),
            Err(err) => {
                self.stats.frames_rejected += 1;
                warn!(error = %err, "rejected frame");
                Err(err)
            }
        }
    }

    /// Run one frame through the pipeline
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameSnapshot {
        let start = Instant::now();
        let index = self.frame;
        self.frame = self.frame.next();
        self.stats.frames += 1;

        // Stage 1: one consistent threshold version for the whole frame
        let thresholds = self.thresholds.snapshot();

        // Stage 2: derive angles
        let signals = FrameSignals::derive(frame, thresholds.get(ThresholdKey::Visibility));

        // Stage 3: posture runs whatever the exercise
        self.posture.observe(&signals.posture, &thresholds);

        // Stage 4: selected exercise
        let kind = self.plan.current().and_then(ExerciseDescriptor::kind);
        let update = match kind {
            Some(kind) => {
                let update = self.tracker_mut(kind).update(frame, &signals, &thresholds, index);
                if kind_angle(kind, &signals).is_none() {
                    self.stats.frames_without_angle += 1;
                }
                update
            }
            None => TrackerUpdate::default(),
        };

        // Stage 5: mistakes
        if let Some(kind) = kind {
            if update.rep_started {
                self.mistakes.begin_rep(kind);
            }
            for cue in &update.cues {
                self.mistakes.record(kind, *cue);
            }
        }

        // Stage 6: progress
        let announcements = self.advance_progress(update.rep_completed);

        // Stage 7: snapshot
        let snapshot = FrameSnapshot {
            frame: index.value(),
            exercise: kind.map(|kind| self.exercise_report(kind)),
            posture_good: self.posture.is_good(),
            progress: self.progress.as_ref().map(|p| p.report(self.frame_rate)),
            announcements,
            score: self.plan.score(),
        };

        self.stats.last_frame_duration = start.elapsed();
        trace!(frame = index.value(), exercise = ?snapshot.exercise, "frame processed");
        snapshot
    }

    fn advance_progress(&mut self, rep_completed: bool) -> Vec<String> {
        let Some(progress) = self.progress.as_mut() else {
            return Vec::new();
        };

        let mut cues = Vec::new();
        if rep_completed {
            cues.extend(progress.record_rep());
        }
        cues.extend(progress.tick(self.frame_rate));

        let completed = cues.contains(&ProgressCue::Completed);
        let announcements = cues.into_iter().map(ProgressCue::message).collect();
        if completed {
            self.plan.complete_current();
            self.start_current();
        }
        announcements
    }

    fn exercise_report(&self, kind: ExerciseKind) -> ExerciseReport {
        let tracker = self.tracker(kind);
        ExerciseReport {
            kind,
            rep_count: tracker.reps(),
            phase: tracker.phase_name(),
            feedback: tracker.feedback(),
        }
    }

    /// Completed reps of one exercise over the whole session
    pub fn reps(&self, kind: ExerciseKind) -> u32 {
        self.tracker(kind).reps()
    }

    pub fn posture(&self) -> &PostureMonitor {
        &self.posture
    }

    pub fn mistakes(&self) -> &MistakeTracker {
        &self.mistakes
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames: self.stats.frames,
            squat_reps: self.squat.reps(),
            curl_reps: self.curl.reps(),
            good_posture_seconds: self.posture.total_good_seconds(),
            bad_posture_seconds: self.posture.total_bad_seconds(),
            exercises_completed: self.plan.completed(),
            score: self.plan.score(),
            mistakes_report: self.mistakes.report(),
        }
    }
}

fn kind_angle(kind: ExerciseKind, signals: &FrameSignals) -> Option<f32> {
    match kind {
        ExerciseKind::Squat => signals.knee_angle(),
        ExerciseKind::BicepCurl => signals.active_arm().map(|(_, angle)| angle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{squat_pose, standing};
    use reptrack_core::RepTrackError;

    const SQUAT_REP: [f32; 9] = [170.0, 150.0, 120.0, 90.0, 75.0, 70.0, 75.0, 90.0, 165.0];

    fn session() -> Session {
        Session::new(EngineConfig::default()).unwrap()
    }

    fn squat_rep(session: &mut Session) -> Vec<FrameSnapshot> {
        SQUAT_REP
            .iter()
            .map(|k| session.process_frame(&squat_pose(*k, 30.0)))
            .collect()
    }

    #[test]
    fn test_squat_plan_completes() {
        let mut session = session();
        session.set_plan(vec![
            ExerciseDescriptor::new("Squat", 1, 2),
            ExerciseDescriptor::new("Curl", 1, 3),
        ]);

        let first = squat_rep(&mut session);
        let last = first.last().unwrap();
        assert_eq!(last.announcements, vec!["1".to_string()]);
        let report = last.exercise.as_ref().unwrap();
        assert_eq!(report.kind, ExerciseKind::Squat);
        assert_eq!(report.rep_count, 1);
        assert_eq!(report.phase, "IDLE");
        assert_eq!(last.progress.unwrap().remaining, 1);

        // Hold frame carries the form verdict
        assert_eq!(first[6].exercise.as_ref().unwrap().feedback, vec!["Correct form".to_string()]);

        let second = squat_rep(&mut session);
        let done = second.last().unwrap();
        assert_eq!(done.announcements, vec!["Amazing, good job!".to_string()]);
        assert_eq!(done.score, 10);
        assert_eq!(session.current_exercise().unwrap().name, "Curl");
        assert_eq!(session.reps(ExerciseKind::Squat), 2);
        assert_eq!(session.plan().completed(), 1);
    }

    #[test]
    fn test_empty_exercise_advances_plan() {
        let mut session = session();
        session.set_plan(vec![
            ExerciseDescriptor::new("squat", 0, 10),
            ExerciseDescriptor::new("curl", 1, 3),
        ]);

        let first = session.process_frame(&standing());
        assert_eq!(first.announcements, vec!["Amazing, good job!".to_string()]);
        assert_eq!(first.score, 10);
        assert_eq!(session.current_exercise().unwrap().name, "curl");

        // The curl target is still open
        let next = session.process_frame(&standing());
        assert!(next.announcements.is_empty());
        assert_eq!(next.progress.unwrap().remaining, 3);
        assert!(!next.progress.unwrap().completed);
    }

    #[test]
    fn test_unknown_exercise_tracks_posture_only() {
        let mut session = session();
        session.select_exercise(ExerciseDescriptor::new("Lunges", 3, 10));

        let snapshot = session.process_frame(&standing());
        assert!(snapshot.exercise.is_none());
        assert!(snapshot.posture_good);
        assert_eq!(snapshot.progress.unwrap().remaining, 30);
    }

    #[test]
    fn test_no_exercise_selected() {
        let mut session = session();
        let snapshot = session.process_frame(&standing());
        assert!(snapshot.exercise.is_none());
        assert!(snapshot.progress.is_none());
        assert_eq!(snapshot.frame, 0);
        assert_eq!(session.process_frame(&standing()).frame, 1);
    }

    #[test]
    fn test_threshold_change_applies_next_frame() {
        let mut session = session();
        session.select_exercise(ExerciseDescriptor::new("squat", 1, 10));
        session.thresholds().set(ThresholdKey::SquatStart, 140.0).unwrap();

        let snapshot = session.process_frame(&squat_pose(150.0, 30.0));
        assert_eq!(snapshot.exercise.unwrap().phase, "IDLE");

        session.thresholds().set(ThresholdKey::SquatStart, 160.0).unwrap();
        let snapshot = session.process_frame(&squat_pose(150.0, 30.0));
        assert_eq!(snapshot.exercise.unwrap().phase, "SQUAT_START");
    }

    #[test]
    fn test_rejected_flat_frame() {
        let mut session = session();
        assert!(matches!(
            session.process_flat(&[0.0; 12]),
            Err(RepTrackError::InvalidFrameLength { .. })
        ));
        assert_eq!(session.stats().frames_rejected, 1);
        assert_eq!(session.stats().frames, 0);

        let flat = vec![0.0; 33 * 4];
        assert!(session.process_flat(&flat).is_ok());
    }

    #[test]
    fn test_timed_exercise_counts_down() {
        let config = EngineConfig {
            frame_rate: 10.0,
            ..EngineConfig::default()
        };
        let mut session = Session::new(config).unwrap();
        session.select_exercise(ExerciseDescriptor::timed("plank", 1));

        let snapshots: Vec<_> = (0..10).map(|_| session.process_frame(&standing())).collect();
        assert_eq!(snapshots[0].announcements, vec!["1".to_string()]);
        assert_eq!(snapshots[9].announcements, vec!["Amazing, good job!".to_string()]);
        assert_eq!(snapshots[9].score, 10);
        assert!(session.plan().is_finished());
    }

    #[test]
    fn test_summary() {
        let mut session = session();
        session.select_exercise(ExerciseDescriptor::new("squat", 1, 5));
        squat_rep(&mut session);

        let summary = session.summary();
        assert_eq!(summary.frames, SQUAT_REP.len() as u64);
        assert_eq!(summary.squat_reps, 1);
        assert_eq!(summary.curl_reps, 0);
        assert!(summary.bad_posture_seconds > 0.0);
        assert!(summary.mistakes_report.contains("SQUAT MISTAKES:"));
    }
}
