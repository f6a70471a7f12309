//! Moving average over the last few samples

use std::collections::VecDeque;

/// Arithmetic mean of the most recent `capacity` samples
#[derive(Clone, Debug)]
pub struct MovingAverage {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl MovingAverage {
    pub const DEFAULT_CAPACITY: usize = 5;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MovingAverage {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a sample and return the current mean
    pub fn push(&mut self, sample: f32) -> f32 {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.mean().unwrap_or(sample)
    }

    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_slides() {
        let mut avg = MovingAverage::new(3);
        assert_eq!(avg.push(3.0), 3.0);
        assert_eq!(avg.push(6.0), 4.5);
        assert_eq!(avg.push(9.0), 6.0);
        // 3.0 drops out
        assert_eq!(avg.push(12.0), 9.0);
        assert_eq!(avg.len(), 3);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut avg = MovingAverage::new(0);
        avg.push(1.0);
        assert_eq!(avg.push(5.0), 5.0);
        avg.clear();
        assert!(avg.mean().is_none());
    }
}
