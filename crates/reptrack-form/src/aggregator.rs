//! Feedback aggregation
//!
//! Per-frame cues flicker. The aggregator keeps the last few diagnostics in
//! insertion order and, on read, picks the highest priority, breaking ties
//! by recency. Anything evicted from the window can no longer be shown.

use std::collections::VecDeque;

use reptrack_core::Diagnostic;

/// Default number of diagnostics kept in the window
pub const DEFAULT_FEEDBACK_WINDOW: usize = 5;

#[derive(Clone, Debug)]
struct WindowEntry {
    diagnostic: Diagnostic,
    seq: u64,
}

/// Sliding window of diagnostics with priority-then-recency selection
#[derive(Clone, Debug)]
pub struct FeedbackAggregator {
    window: VecDeque<WindowEntry>,
    capacity: usize,
    next_seq: u64,
}

impl FeedbackAggregator {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        FeedbackAggregator {
            window: VecDeque::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Push a diagnostic, evicting the oldest when full
    pub fn ingest(&mut self, diagnostic: Diagnostic) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(WindowEntry {
            diagnostic,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Highest priority, most recently inserted diagnostic in the window
    pub fn current(&self) -> Option<&Diagnostic> {
        self.window
            .iter()
            .max_by_key(|e| (e.diagnostic.priority, e.seq))
            .map(|e| &e.diagnostic)
    }

    /// Message list handed to the presentation layer: zero or one entry
    pub fn current_feedback(&self) -> Vec<String> {
        self.current()
            .map(|d| vec![d.message.clone()])
            .unwrap_or_default()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.window.iter().any(|e| e.diagnostic.message == message)
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for FeedbackAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_WINDOW)
    }
}
