//! Frame time - frame indices and the capture rate

/// Monotonic frame counter within a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub const ZERO: FrameIndex = FrameIndex(0);

    #[inline]
    pub fn new(index: u64) -> Self {
        FrameIndex(index)
    }

    #[inline]
    pub fn next(self) -> Self {
        FrameIndex(self.0.saturating_add(1))
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Capture rate in frames per second
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRate(f32);

impl FrameRate {
    pub const DEFAULT_FPS: f32 = 30.0;

    /// Non-positive or non-finite rates fall back to the default
    pub fn new(fps: f32) -> Self {
        if fps.is_finite() && fps > 0.0 {
            FrameRate(fps)
        } else {
            FrameRate(Self::DEFAULT_FPS)
        }
    }

    #[inline]
    pub fn fps(self) -> f32 {
        self.0
    }

    /// Seconds covered by `frames` frames
    #[inline]
    pub fn seconds(self, frames: u64) -> f32 {
        frames as f32 / self.0
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        FrameRate(Self::DEFAULT_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_seconds() {
        let rate = FrameRate::new(30.0);
        assert!((rate.seconds(45) - 1.5).abs() < 1e-6);
        assert_eq!(FrameRate::new(0.0).fps(), FrameRate::DEFAULT_FPS);
        assert_eq!(FrameRate::new(f32::NAN).fps(), FrameRate::DEFAULT_FPS);
    }

    #[test]
    fn test_frame_index_next() {
        assert_eq!(FrameIndex::ZERO.next(), FrameIndex(1));
        assert_eq!(FrameIndex(u64::MAX).next(), FrameIndex(u64::MAX));
    }
}
