//! Diagnostics - textual form observations with a priority
//!
//! A diagnostic has no identity beyond its text: two diagnostics with the
//! same message are the same observation for aggregation purposes.

use std::fmt;

/// Feedback priority (higher wins)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A single form-quality observation
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub message: String,
    pub priority: Priority,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, priority: Priority) -> Self {
        Diagnostic {
            message: message.into(),
            priority,
        }
    }

    pub fn high(message: impl Into<String>) -> Self {
        Self::new(message, Priority::High)
    }

    pub fn medium(message: impl Into<String>) -> Self {
        Self::new(message, Priority::Medium)
    }

    pub fn low(message: impl Into<String>) -> Self {
        Self::new(message, Priority::Low)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for Diagnostic {}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
