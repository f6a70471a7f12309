//! End-to-end scenarios over the session pipeline
//!
//! A scenario is a config, a workout plan and a frame stream. Running it
//! drives a fresh [`Session`] and keeps every snapshot for inspection.

use reptrack_core::{ExerciseDescriptor, ExerciseKind, LandmarkFrame, RepTrackResult};
use reptrack_runtime::{EngineConfig, FrameSnapshot, Session, SessionSummary};

/// Feed frames to a session and collect the snapshots
pub fn drive(session: &mut Session, frames: &[LandmarkFrame]) -> Vec<FrameSnapshot> {
    frames.iter().map(|f| session.process_frame(f)).collect()
}

/// Same as [`drive`], through the flat wire layout
pub fn drive_flat(session: &mut Session, frames: &[LandmarkFrame]) -> RepTrackResult<Vec<FrameSnapshot>> {
    frames
        .iter()
        .map(|f| session.process_flat(&f.to_flat()))
        .collect()
}

/// Everything a finished scenario produced
#[derive(Clone, Debug)]
pub struct ScenarioResult {
    pub snapshots: Vec<FrameSnapshot>,
    pub summary: SessionSummary,
}

impl ScenarioResult {
    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.snapshots.last()
    }

    /// Latest rep count reported for `kind`
    pub fn reps(&self, kind: ExerciseKind) -> u32 {
        self.snapshots
            .iter()
            .rev()
            .filter_map(|s| s.exercise.as_ref())
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.rep_count)
    }

    /// `message` was on screen at least once
    pub fn feedback_seen(&self, message: &str) -> bool {
        self.snapshots
            .iter()
            .filter_map(|s| s.exercise.as_ref())
            .any(|e| e.feedback.iter().any(|m| m == message))
    }

    /// Every progress announcement, in order
    pub fn announcements(&self) -> Vec<String> {
        self.snapshots
            .iter()
            .flat_map(|s| s.announcements.iter().cloned())
            .collect()
    }

    pub fn posture_good_frames(&self) -> usize {
        self.snapshots.iter().filter(|s| s.posture_good).count()
    }
}

/// Scenario builder
#[derive(Clone, Debug, Default)]
pub struct Scenario {
    config: EngineConfig,
    plan: Vec<ExerciseDescriptor>,
    frames: Vec<LandmarkFrame>,
    flat: bool,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn exercise(mut self, descriptor: ExerciseDescriptor) -> Self {
        self.plan.push(descriptor);
        self
    }

    pub fn frames(mut self, frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Submit frames in the flat layout instead of as structs
    pub fn flat(mut self) -> Self {
        self.flat = true;
        self
    }

    /// Session the scenario will run on
    pub fn session(&self) -> RepTrackResult<Session> {
        let mut session = Session::new(self.config.clone())?;
        if !self.plan.is_empty() {
            session.set_plan(self.plan.clone());
        }
        Ok(session)
    }

    pub fn run(self) -> RepTrackResult<ScenarioResult> {
        let mut session = self.session()?;
        self.run_on(&mut session)
    }

    /// Run on a prepared session, e.g. one with adjusted thresholds
    pub fn run_on(self, session: &mut Session) -> RepTrackResult<ScenarioResult> {
        let snapshots = if self.flat {
            drive_flat(session, &self.frames)?
        } else {
            drive(session, &self.frames)
        };
        Ok(ScenarioResult {
            snapshots,
            summary: session.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurlStyle, NoiseConfig, Pose, PoseSimulator, SquatStyle};
    use proptest::prelude::*;
    use reptrack_core::{BodyPart, Side, ThresholdKey};
    use reptrack_form::MistakeCategory;
    use reptrack_runtime::{spawn_worker, ThresholdAdjuster};

    fn squats(reps: usize, style: &SquatStyle) -> Vec<LandmarkFrame> {
        PoseSimulator::new().squats(reps, style)
    }

    fn curls(reps: usize, style: &CurlStyle) -> Vec<LandmarkFrame> {
        PoseSimulator::new().curls(reps, style)
    }

    #[test]
    fn test_clean_squats_complete_plan() {
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 5))
            .frames(squats(5, &SquatStyle::default()))
            .run()
            .unwrap();

        assert_eq!(result.summary.squat_reps, 5);
        assert_eq!(result.summary.exercises_completed, 1);
        assert_eq!(result.summary.score, 10);
        assert_eq!(
            result.announcements(),
            vec!["4", "3", "2", "1", "Amazing, good job!"]
        );
        assert!(result.feedback_seen("Correct form"));
    }

    #[test]
    fn test_shallow_squats_not_counted() {
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 5))
            .frames(squats(3, &SquatStyle::shallow()))
            .run()
            .unwrap();

        assert_eq!(result.reps(ExerciseKind::Squat), 0);
        assert_eq!(result.last().unwrap().progress.unwrap().remaining, 5);
    }

    #[test]
    fn test_upright_squat_feedback() {
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .frames(squats(2, &SquatStyle::upright()))
            .run()
            .unwrap();

        assert_eq!(result.reps(ExerciseKind::Squat), 2);
        assert!(result.feedback_seen("Bend forward more"));
        assert!(!result.feedback_seen("Correct form"));
        assert!(result.summary.mistakes_report.contains("SQUAT MISTAKES:"));
    }

    #[test]
    fn test_side_view_squats() {
        let frames = PoseSimulator::new()
            .with_base(Pose::standing().hide_side(Side::Right))
            .squats(3, &SquatStyle::default());
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .frames(frames)
            .run()
            .unwrap();

        assert_eq!(result.reps(ExerciseKind::Squat), 3);
    }

    #[test]
    fn test_clean_curls() {
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("bicep curl", 1, 10))
            .frames(curls(3, &CurlStyle::default()))
            .run()
            .unwrap();

        assert_eq!(result.summary.curl_reps, 3);
        assert!(result.feedback_seen("Correct form, keep it up"));
        assert_eq!(result.posture_good_frames(), result.snapshots.len());
    }

    #[test]
    fn test_swinging_curls() {
        let mut session = Scenario::new()
            .exercise(ExerciseDescriptor::new("curl", 1, 10))
            .session()
            .unwrap();
        let result = Scenario::new()
            .frames(curls(2, &CurlStyle::swinging()))
            .run_on(&mut session)
            .unwrap();

        assert_eq!(result.summary.curl_reps, 2);
        assert!(result.feedback_seen("Your body is excessively swinging. Keep your body stable."));
        assert!(!result.feedback_seen("Correct form, keep it up"));
        // Slight then excessive, in each rep
        assert_eq!(
            session
                .mistakes()
                .count(ExerciseKind::BicepCurl, MistakeCategory::WrongWeight),
            4
        );
    }

    #[test]
    fn test_drift_caught_after_adjustment() {
        let frames = curls(1, &CurlStyle::shrugging(0.1));

        let untouched = Scenario::new()
            .exercise(ExerciseDescriptor::new("curl", 1, 10))
            .frames(frames.clone())
            .run()
            .unwrap();
        assert!(!untouched.feedback_seen("Keep your upper arm still"));

        let mut session = Scenario::new()
            .exercise(ExerciseDescriptor::new("curl", 1, 10))
            .session()
            .unwrap();
        session
            .thresholds()
            .set(ThresholdKey::CurlShoulderMovement, 0.05)
            .unwrap();
        let tightened = Scenario::new().frames(frames).run_on(&mut session).unwrap();
        assert!(tightened.feedback_seen("Keep your upper arm still"));
    }

    #[test]
    fn test_untracked_elbow_notice() {
        // Hips hidden: the arm is measurable, its angle to the torso is not
        let base = Pose::standing()
            .hide(BodyPart::LeftHip)
            .hide(BodyPart::RightHip);
        let frames = PoseSimulator::new().with_base(base).curls(1, &CurlStyle::default());
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("curl", 1, 10))
            .frames(frames)
            .run()
            .unwrap();

        assert!(result.feedback_seen("Unable to detect elbow movement accurately"));
        assert_eq!(result.summary.curl_reps, 1);
    }

    #[test]
    fn test_plan_moves_to_next_exercise() {
        let mut frames = squats(2, &SquatStyle::default());
        frames.extend(curls(2, &CurlStyle::default()));
        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 2))
            .exercise(ExerciseDescriptor::new("curl", 1, 2))
            .frames(frames)
            .run()
            .unwrap();

        assert_eq!(result.summary.exercises_completed, 2);
        assert_eq!(result.summary.score, 20);
        assert_eq!(result.summary.squat_reps, 2);
        assert_eq!(result.summary.curl_reps, 2);
    }

    #[test]
    fn test_flat_layout_matches_struct_frames() {
        let frames = squats(2, &SquatStyle::default());
        let structs = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .frames(frames.clone())
            .run()
            .unwrap();
        let flat = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .frames(frames)
            .flat()
            .run()
            .unwrap();

        assert_eq!(structs.snapshots, flat.snapshots);
    }

    #[test]
    fn test_adjuster_phrase_changes_outcome() {
        // Default bottom is 80: a 85-degree squat never counts
        let style = SquatStyle {
            depth: 85.0,
            ..SquatStyle::default()
        };
        let mut session = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .session()
            .unwrap();
        let before = Scenario::new()
            .frames(squats(1, &style))
            .run_on(&mut session)
            .unwrap();
        assert_eq!(before.reps(ExerciseKind::Squat), 0);

        session.thresholds().set(ThresholdKey::SquatBottom, 90.0).unwrap();
        let after = Scenario::new()
            .frames(squats(1, &style))
            .run_on(&mut session)
            .unwrap();
        assert_eq!(after.reps(ExerciseKind::Squat), 1);

        let adjuster = ThresholdAdjuster::new(session.thresholds().clone());
        let adjustment = adjuster.adjust("squat is too deep").unwrap();
        assert_eq!(adjustment.request.key, ThresholdKey::SquatKneeUpperLimit);
    }

    #[test]
    fn test_hostile_stream_survives() {
        let mut sim = PoseSimulator::with_noise(NoiseConfig::hostile(), 1234);
        let mut frames = sim.squats(5, &SquatStyle::default());
        frames.extend(sim.idle(30));

        let result = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .frames(frames)
            .run()
            .unwrap();

        assert_eq!(result.snapshots.len(), 181);
        assert!(result.reps(ExerciseKind::Squat) <= 5);
        assert!(result
            .snapshots
            .iter()
            .filter_map(|s| s.exercise.as_ref())
            .all(|e| e.feedback.len() <= 1));
    }

    #[tokio::test]
    async fn test_worker_matches_direct_session() {
        let frames = squats(3, &SquatStyle::default());
        let scenario = Scenario::new()
            .exercise(ExerciseDescriptor::new("squat", 1, 10))
            .frames(frames.clone());

        let direct = scenario.clone().run().unwrap();

        let mut worker = spawn_worker(scenario.session().unwrap(), 8);
        let mut streamed = Vec::new();
        for frame in frames {
            worker.submit(frame).await.unwrap();
            streamed.push(worker.next_snapshot().await.unwrap());
        }
        let session = worker.shutdown().await.unwrap();

        assert_eq!(streamed, direct.snapshots);
        assert_eq!(session.reps(ExerciseKind::Squat), 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_noise_never_adds_reps(seed in any::<u64>(), reps in 1usize..4) {
            let frames = PoseSimulator::with_noise(NoiseConfig::mild(), seed)
                .squats(reps, &SquatStyle::default());
            let result = Scenario::new()
                .exercise(ExerciseDescriptor::new("squat", 1, 10))
                .frames(frames)
                .run()
                .unwrap();
            prop_assert!(result.reps(ExerciseKind::Squat) <= reps as u32);
        }
    }
}
