//! Phase definitions and transition tables
//!
//! Every predicate is a sign test on the angle's frame-to-frame change,
//! or a comparison against a fixed cutoff, so one remembered angle is enough.

use std::fmt::Debug;

use reptrack_core::{ThresholdKey, Thresholds};

/// Result of feeding one angle to a phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<P> {
    pub from: P,
    pub to: P,
    /// Set on exactly one edge per cycle
    pub rep_completed: bool,
}

impl<P: PhaseCycle> Transition<P> {
    pub fn stay(phase: P) -> Self {
        Transition {
            from: phase,
            to: phase,
            rep_completed: false,
        }
    }

    fn to(from: P, to: P) -> Self {
        Transition {
            from,
            to,
            rep_completed: false,
        }
    }

    fn completing(from: P, to: P) -> Self {
        Transition {
            from,
            to,
            rep_completed: true,
        }
    }

    #[inline]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// True on the frame that moves `from` → `to`
    #[inline]
    pub fn is(&self, from: P, to: P) -> bool {
        self.from == from && self.to == to
    }

    /// True on the frame that enters `phase`
    #[inline]
    pub fn entered(&self, phase: P) -> bool {
        self.changed() && self.to == phase
    }
}

/// A cyclic exercise phase with a pure transition function
pub trait PhaseCycle: Copy + Eq + Debug {
    /// Cutoffs read from the current thresholds each frame
    type Limits: Copy + Debug;

    /// Resting phase; every cycle starts and ends here
    const IDLE: Self;

    /// `(state, angle, previous angle) → (next state, rep completed)`
    fn step(self, angle: f32, previous: f32, limits: &Self::Limits) -> Transition<Self>;

    fn limits(thresholds: &Thresholds) -> Self::Limits;

    fn name(self) -> &'static str;
}

/// Squat phases, driven by the knee angle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SquatPhase {
    #[default]
    Idle,
    Start,
    Down,
    Hold,
    Up,
}

/// Squat cutoffs in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SquatLimits {
    /// Below this the squat has begun; back above it the rep is done
    pub start: f32,
    /// Below this the squat is deep enough to count
    pub bottom: f32,
}

impl Default for SquatLimits {
    fn default() -> Self {
        SquatLimits {
            start: ThresholdKey::SquatStart.default_value(),
            bottom: ThresholdKey::SquatBottom.default_value(),
        }
    }
}

impl PhaseCycle for SquatPhase {
    type Limits = SquatLimits;

    const IDLE: Self = SquatPhase::Idle;

    fn step(self, angle: f32, previous: f32, limits: &SquatLimits) -> Transition<Self> {
        use SquatPhase::*;

        match self {
            Idle if angle < limits.start => Transition::to(Idle, Start),
            Start if angle < limits.bottom => Transition::to(Start, Down),
            // Rising again before reaching the bottom aborts the rep
            Start if angle > previous => Transition::to(Start, Idle),
            // Local minimum: the bottom of the rep
            Down if angle >= previous => Transition::to(Down, Hold),
            Hold if angle > previous => Transition::to(Hold, Up),
            Up if angle >= limits.start => Transition::completing(Up, Idle),
            phase => Transition::stay(phase),
        }
    }

    fn limits(thresholds: &Thresholds) -> SquatLimits {
        SquatLimits {
            start: thresholds.get(ThresholdKey::SquatStart),
            bottom: thresholds.get(ThresholdKey::SquatBottom),
        }
    }

    fn name(self) -> &'static str {
        match self {
            SquatPhase::Idle => "IDLE",
            SquatPhase::Start => "SQUAT_START",
            SquatPhase::Down => "SQUAT_DOWN",
            SquatPhase::Hold => "SQUAT_HOLD",
            SquatPhase::Up => "SQUAT_UP",
        }
    }
}

/// Bicep curl phases, driven by the elbow angle of the active arm
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CurlPhase {
    #[default]
    Idle,
    Start,
    Up,
    Hold,
    Down,
}

/// Curl cutoffs in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurlLimits {
    pub start: f32,
    /// Below this the weight is up
    pub top: f32,
    /// Back above this the arm is extended and the rep is done
    pub down: f32,
}

impl Default for CurlLimits {
    fn default() -> Self {
        CurlLimits {
            start: ThresholdKey::CurlStart.default_value(),
            top: ThresholdKey::CurlTop.default_value(),
            down: ThresholdKey::CurlDown.default_value(),
        }
    }
}

impl PhaseCycle for CurlPhase {
    type Limits = CurlLimits;

    const IDLE: Self = CurlPhase::Idle;

    fn step(self, angle: f32, previous: f32, limits: &CurlLimits) -> Transition<Self> {
        use CurlPhase::*;

        match self {
            Idle if angle < limits.start => Transition::to(Idle, Start),
            Start if angle < limits.top => Transition::to(Start, Up),
            Start if angle > previous => Transition::to(Start, Idle),
            // Contraction stopped: peak of the curl
            Up if angle >= previous => Transition::to(Up, Hold),
            Hold if angle > previous => Transition::to(Hold, Down),
            Down if angle >= limits.down => Transition::completing(Down, Idle),
            phase => Transition::stay(phase),
        }
    }

    fn limits(thresholds: &Thresholds) -> CurlLimits {
        CurlLimits {
            start: thresholds.get(ThresholdKey::CurlStart),
            top: thresholds.get(ThresholdKey::CurlTop),
            down: thresholds.get(ThresholdKey::CurlDown),
        }
    }

    fn name(self) -> &'static str {
        match self {
            CurlPhase::Idle => "IDLE",
            CurlPhase::Start => "CURL_START",
            CurlPhase::Up => "CURL_UP",
            CurlPhase::Hold => "CURL_HOLD",
            CurlPhase::Down => "CURL_DOWN",
        }
    }
}
