//! Rep counter

/// Completed repetitions of one exercise instance
///
/// Never decreases; a fresh exercise gets a fresh counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RepCounter(u32);

impl RepCounter {
    pub fn new() -> Self {
        RepCounter(0)
    }

    #[inline]
    pub fn increment(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }

    #[inline]
    pub fn count(self) -> u32 {
        self.0
    }
}
