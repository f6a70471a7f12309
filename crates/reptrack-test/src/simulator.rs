//! Rep generator - scripted squat and curl sessions
//!
//! Each rep follows a cosine profile from rest to the extreme angle and
//! back, so the angle moves monotonically on either side of the turn.

use reptrack_core::LandmarkFrame;

use crate::{NoiseConfig, NoiseModel, NoiseStats, Pose};

/// Frames per rep at 30 fps, roughly one second
pub const DEFAULT_FRAMES_PER_REP: usize = 30;

/// Angle of the limb at rest between reps
pub const REST_ANGLE: f32 = 175.0;

/// `frames` samples of one rep; the last sample is one step short of rest
pub fn rep_profile(rest: f32, extreme: f32, frames: usize) -> Vec<f32> {
    let frames = frames.max(2);
    (0..frames)
        .map(|i| {
            let t = i as f32 / frames as f32;
            let depth = (1.0 - (std::f32::consts::TAU * t).cos()) / 2.0;
            rest - (rest - extreme) * depth
        })
        .collect()
}

/// How a squat rep is performed
#[derive(Clone, Debug, PartialEq)]
pub struct SquatStyle {
    /// Knee angle at the bottom
    pub depth: f32,
    /// Torso lean held through the rep
    pub lean: f32,
    pub frames_per_rep: usize,
}

impl Default for SquatStyle {
    fn default() -> Self {
        SquatStyle {
            depth: 70.0,
            lean: 30.0,
            frames_per_rep: DEFAULT_FRAMES_PER_REP,
        }
    }
}

impl SquatStyle {
    /// Bottom never reached
    pub fn shallow() -> Self {
        SquatStyle {
            depth: 100.0,
            ..Self::default()
        }
    }

    /// Torso kept too vertical
    pub fn upright() -> Self {
        SquatStyle {
            lean: 10.0,
            ..Self::default()
        }
    }
}

/// How a curl rep is performed
#[derive(Clone, Debug, PartialEq)]
pub struct CurlStyle {
    /// Elbow angle at the top
    pub peak: f32,
    /// Torso lean added at the top of the rep
    pub swing: f32,
    /// Upward shoulder travel at the top of the rep
    pub shoulder_drift: f32,
    pub frames_per_rep: usize,
}

impl Default for CurlStyle {
    fn default() -> Self {
        CurlStyle {
            peak: 45.0,
            swing: 0.0,
            shoulder_drift: 0.0,
            frames_per_rep: DEFAULT_FRAMES_PER_REP,
        }
    }
}

impl CurlStyle {
    /// Body thrown back to move the weight
    pub fn swinging() -> Self {
        CurlStyle {
            swing: 40.0,
            ..Self::default()
        }
    }

    pub fn shrugging(drift: f32) -> Self {
        CurlStyle {
            shoulder_drift: drift,
            ..Self::default()
        }
    }
}

/// Generates pose streams and passes them through a noise model
pub struct PoseSimulator {
    base: Pose,
    noise: NoiseModel,
}

impl Default for PoseSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseSimulator {
    /// Noise-free simulator
    pub fn new() -> Self {
        Self::with_noise(NoiseConfig::none(), 0)
    }

    pub fn with_noise(config: NoiseConfig, seed: u64) -> Self {
        PoseSimulator {
            base: Pose::standing(),
            noise: NoiseModel::with_seed(config, seed),
        }
    }

    /// Pose every generated frame starts from
    pub fn with_base(mut self, base: Pose) -> Self {
        self.base = base;
        self
    }

    pub fn noise_stats(&self) -> &NoiseStats {
        self.noise.stats()
    }

    fn emit(&mut self, pose: &Pose) -> LandmarkFrame {
        self.noise.apply(&pose.frame())
    }

    /// Standing still
    pub fn idle(&mut self, frames: usize) -> Vec<LandmarkFrame> {
        let pose = self.base.clone();
        (0..frames).map(|_| self.emit(&pose)).collect()
    }

    /// `reps` squats followed by one frame standing
    pub fn squats(&mut self, reps: usize, style: &SquatStyle) -> Vec<LandmarkFrame> {
        let profile = rep_profile(REST_ANGLE, style.depth, style.frames_per_rep);
        let mut frames = Vec::with_capacity(reps * profile.len() + 1);

        for _ in 0..reps {
            for knee in &profile {
                let pose = Pose {
                    knee: *knee,
                    lean: style.lean,
                    ..self.base.clone()
                };
                frames.push(self.emit(&pose));
            }
        }
        let rest = Pose {
            knee: REST_ANGLE,
            lean: style.lean,
            ..self.base.clone()
        };
        frames.push(self.emit(&rest));
        frames
    }

    /// `reps` right-arm curls followed by one frame at rest
    ///
    /// The left arm hangs straight so the right arm is always the active one.
    pub fn curls(&mut self, reps: usize, style: &CurlStyle) -> Vec<LandmarkFrame> {
        let profile = rep_profile(REST_ANGLE, style.peak, style.frames_per_rep);
        let range = (REST_ANGLE - style.peak).max(f32::EPSILON);
        let mut frames = Vec::with_capacity(reps * profile.len() + 1);

        for _ in 0..reps {
            for elbow in &profile {
                // Swing and drift peak with the contraction
                let effort = (REST_ANGLE - elbow) / range;
                let pose = Pose {
                    right_elbow: *elbow,
                    left_elbow: 178.0,
                    lean: self.base.lean + style.swing * effort,
                    shoulder_shift: self.base.shoulder_shift - style.shoulder_drift * effort,
                    ..self.base.clone()
                };
                frames.push(self.emit(&pose));
            }
        }
        let rest = Pose {
            right_elbow: REST_ANGLE,
            left_elbow: 178.0,
            ..self.base.clone()
        };
        frames.push(self.emit(&rest));
        frames
    }
}
