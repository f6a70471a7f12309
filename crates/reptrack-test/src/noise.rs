//! Estimator noise for pose streams
//!
//! Simulates what a real pose estimator does to clean joints:
//! - Coordinate jitter
//! - Single landmarks dropping below the visibility gate
//! - Whole frames lost (nothing visible)

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reptrack_core::LandmarkFrame;

/// Visibility given to a dropped landmark
pub const DROPPED_VISIBILITY: f32 = 0.05;

/// Noise configuration
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Max coordinate offset, uniform in [-jitter, jitter]
    pub jitter: f32,
    /// Per-landmark dropout probability (0.0 - 1.0)
    pub dropout_rate: f64,
    /// Per-frame loss probability (0.0 - 1.0)
    pub frame_loss_rate: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self::mild()
    }
}

impl NoiseConfig {
    /// Frames pass through untouched
    pub fn none() -> Self {
        NoiseConfig {
            jitter: 0.0,
            dropout_rate: 0.0,
            frame_loss_rate: 0.0,
        }
    }

    /// Good lighting, subject fully in frame
    pub fn mild() -> Self {
        NoiseConfig {
            jitter: 0.001,
            dropout_rate: 0.01,
            frame_loss_rate: 0.0,
        }
    }

    /// Poor lighting, partial occlusion
    pub fn hostile() -> Self {
        NoiseConfig {
            jitter: 0.01,
            dropout_rate: 0.15,
            frame_loss_rate: 0.05,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.jitter <= 0.0 && self.dropout_rate <= 0.0 && self.frame_loss_rate <= 0.0
    }
}

/// Noise statistics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoiseStats {
    pub frames: u64,
    pub frames_lost: u64,
    pub landmarks_dropped: u64,
}

impl NoiseStats {
    pub fn loss_rate(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.frames_lost as f64 / self.frames as f64
        }
    }
}

/// Seeded noise source applied frame by frame
pub struct NoiseModel {
    config: NoiseConfig,
    rng: StdRng,
    stats: NoiseStats,
}

impl NoiseModel {
    pub fn new(config: NoiseConfig) -> Self {
        NoiseModel {
            config,
            rng: StdRng::from_entropy(),
            stats: NoiseStats::default(),
        }
    }

    /// Reproducible noise
    pub fn with_seed(config: NoiseConfig, seed: u64) -> Self {
        NoiseModel {
            config,
            rng: StdRng::seed_from_u64(seed),
            stats: NoiseStats::default(),
        }
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    pub fn stats(&self) -> &NoiseStats {
        &self.stats
    }

    /// Noisy copy of `frame`
    pub fn apply(&mut self, frame: &LandmarkFrame) -> LandmarkFrame {
        self.stats.frames += 1;
        let mut noisy = frame.clone();
        if self.config.is_clean() {
            return noisy;
        }

        if self.chance(self.config.frame_loss_rate) {
            self.stats.frames_lost += 1;
            for landmark in noisy.iter_mut() {
                landmark.visibility = 0.0;
            }
            return noisy;
        }

        let jitter = self.config.jitter;
        for landmark in noisy.iter_mut() {
            if jitter > 0.0 {
                landmark.x += self.rng.gen_range(-jitter..=jitter);
                landmark.y += self.rng.gen_range(-jitter..=jitter);
            }
            if self.chance(self.config.dropout_rate) {
                landmark.visibility = DROPPED_VISIBILITY;
                self.stats.landmarks_dropped += 1;
            }
        }
        noisy
    }

    pub fn apply_all<'a, I>(&mut self, frames: I) -> Vec<LandmarkFrame>
    where
        I: IntoIterator<Item = &'a LandmarkFrame>,
    {
        frames.into_iter().map(|f| self.apply(f)).collect()
    }

    fn chance(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.rng.gen_bool(probability.min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pose;

    #[test]
    fn test_clean_passthrough() {
        let frame = Pose::standing().frame();
        let mut model = NoiseModel::with_seed(NoiseConfig::none(), 1);
        assert_eq!(model.apply(&frame), frame);
        assert_eq!(model.stats().frames, 1);
    }

    #[test]
    fn test_jitter_bounded() {
        let frame = Pose::standing().frame();
        let config = NoiseConfig {
            jitter: 0.01,
            dropout_rate: 0.0,
            frame_loss_rate: 0.0,
        };
        let mut model = NoiseModel::with_seed(config, 7);

        for _ in 0..50 {
            let noisy = model.apply(&frame);
            for (a, b) in noisy.iter().zip(frame.iter()) {
                assert!((a.x - b.x).abs() <= 0.01 + 1e-6);
                assert!((a.y - b.y).abs() <= 0.01 + 1e-6);
                assert_eq!(a.visibility, b.visibility);
            }
        }
    }

    #[test]
    fn test_hostile_loses_frames() {
        let frame = Pose::standing().frame();
        let mut model = NoiseModel::with_seed(NoiseConfig::hostile(), 42);
        let noisy = model.apply_all(std::iter::repeat(&frame).take(1000));

        let stats = model.stats();
        assert_eq!(stats.frames, 1000);
        assert!(stats.frames_lost > 10);
        assert!(stats.landmarks_dropped > 1000);
        assert!(stats.loss_rate() < 0.2);

        let blank = noisy
            .iter()
            .filter(|f| f.iter().all(|lm| lm.visibility == 0.0))
            .count();
        assert_eq!(blank as u64, stats.frames_lost);
    }

    #[test]
    fn test_seed_reproducible() {
        let frame = Pose::standing().frame();
        let mut a = NoiseModel::with_seed(NoiseConfig::hostile(), 3);
        let mut b = NoiseModel::with_seed(NoiseConfig::hostile(), 3);
        for _ in 0..20 {
            assert_eq!(a.apply(&frame), b.apply(&frame));
        }
    }
}
