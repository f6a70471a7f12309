//! Phase machine - one instance per exercise

use tracing::debug;

use crate::{PhaseCycle, RepCounter, Transition};

/// Angle assumed before the first sample: a straight limb
pub const REST_ANGLE: f32 = 180.0;

/// Current phase, previous angle and rep count of one exercise
#[derive(Clone, Debug)]
pub struct PhaseMachine<P: PhaseCycle> {
    phase: P,
    previous: f32,
    reps: RepCounter,
}

impl<P: PhaseCycle> Default for PhaseMachine<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PhaseCycle> PhaseMachine<P> {
    pub fn new() -> Self {
        PhaseMachine {
            phase: P::IDLE,
            previous: REST_ANGLE,
            reps: RepCounter::new(),
        }
    }

    /// Feed one angle sample
    ///
    /// `None` means the angle could not be evaluated this frame: the phase and
    /// the remembered angle stay as they were.
    pub fn update(&mut self, angle: Option<f32>, limits: &P::Limits) -> Transition<P> {
        let Some(angle) = angle else {
            return Transition::stay(self.phase);
        };

        let transition = self.phase.step(angle, self.previous, limits);
        if transition.changed() {
            debug!(
                from = transition.from.name(),
                to = transition.to.name(),
                angle,
                previous = self.previous,
                "phase transition"
            );
        }
        if transition.rep_completed {
            let reps = self.reps.increment();
            debug!(reps, "rep completed");
        }

        self.phase = transition.to;
        self.previous = angle;
        transition
    }

    pub fn phase(&self) -> P {
        self.phase
    }

    pub fn previous_angle(&self) -> f32 {
        self.previous
    }

    pub fn reps(&self) -> u32 {
        self.reps.count()
    }

    pub fn is_idle(&self) -> bool {
        self.phase == P::IDLE
    }

    /// Back to Idle, keeping the rep count
    pub fn reset_phase(&mut self) {
        self.phase = P::IDLE;
        self.previous = REST_ANGLE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurlLimits, CurlPhase, SquatLimits, SquatPhase};
    use proptest::prelude::*;

    fn run<P: PhaseCycle>(machine: &mut PhaseMachine<P>, limits: &P::Limits, angles: &[f32]) -> Vec<P> {
        let mut visited = vec![machine.phase()];
        for angle in angles {
            let t = machine.update(Some(*angle), limits);
            if t.changed() {
                visited.push(t.to);
            }
        }
        visited
    }

    #[test]
    fn test_full_squat_cycle() {
        let mut machine = PhaseMachine::<SquatPhase>::new();
        let limits = SquatLimits::default();
        let angles = [170.0, 150.0, 120.0, 90.0, 75.0, 70.0, 75.0, 90.0, 120.0, 150.0, 165.0];

        let visited = run(&mut machine, &limits, &angles);
        assert_eq!(
            visited,
            vec![
                SquatPhase::Idle,
                SquatPhase::Start,
                SquatPhase::Down,
                SquatPhase::Hold,
                SquatPhase::Up,
                SquatPhase::Idle,
            ]
        );
        assert_eq!(machine.reps(), 1);
    }

    #[test]
    fn test_shallow_squat_aborts() {
        let mut machine = PhaseMachine::<SquatPhase>::new();
        let limits = SquatLimits::default();
        let angles = [170.0, 150.0, 130.0, 110.0, 100.0, 105.0, 165.0, 170.0];

        let visited = run(&mut machine, &limits, &angles);
        assert_eq!(visited, vec![SquatPhase::Idle, SquatPhase::Start, SquatPhase::Idle]);
        assert_eq!(machine.reps(), 0);
    }

    #[test]
    fn test_full_curl_cycle() {
        let mut machine = PhaseMachine::<CurlPhase>::new();
        let limits = CurlLimits::default();
        let angles = [170.0, 150.0, 120.0, 80.0, 60.0, 50.0, 55.0, 70.0, 120.0, 155.0];

        let visited = run(&mut machine, &limits, &angles);
        assert_eq!(
            visited,
            vec![
                CurlPhase::Idle,
                CurlPhase::Start,
                CurlPhase::Up,
                CurlPhase::Hold,
                CurlPhase::Down,
                CurlPhase::Idle,
            ]
        );
        assert_eq!(machine.reps(), 1);
    }

    #[test]
    fn test_missing_angle_keeps_state() {
        let mut machine = PhaseMachine::<SquatPhase>::new();
        let limits = SquatLimits::default();
        machine.update(Some(150.0), &limits);

        let t = machine.update(None, &limits);
        assert!(!t.changed());
        assert_eq!(machine.phase(), SquatPhase::Start);
        assert_eq!(machine.previous_angle(), 150.0);
    }

    #[test]
    fn test_reset_phase_keeps_reps() {
        let mut machine = PhaseMachine::<SquatPhase>::new();
        let limits = SquatLimits::default();
        run(&mut machine, &limits, &[150.0, 70.0, 75.0, 90.0, 165.0, 150.0]);
        assert_eq!(machine.reps(), 1);
        assert_eq!(machine.phase(), SquatPhase::Start);

        machine.reset_phase();
        assert!(machine.is_idle());
        assert_eq!(machine.reps(), 1);
    }

    proptest! {
        #[test]
        fn prop_reps_bounded_by_cycles(angles in proptest::collection::vec(0.0f32..180.0, 0..200)) {
            let mut machine = PhaseMachine::<SquatPhase>::new();
            let limits = SquatLimits::default();
            let mut idle_entries = 0u32;
            let mut last = 0;
            for angle in &angles {
                let t = machine.update(Some(*angle), &limits);
                if t.entered(SquatPhase::Idle) {
                    idle_entries += 1;
                }
                prop_assert!(machine.reps() >= last);
                last = machine.reps();
            }
            prop_assert!(machine.reps() <= idle_entries);
        }
    }
}
