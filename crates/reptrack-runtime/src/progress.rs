//! Exercise progress - reps left, timed countdown and spoken cues

use serde::Serialize;

use reptrack_core::{ExerciseDescriptor, FrameRate};

/// Announcement raised when the remaining count changes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressCue {
    /// 1..=5 units left
    Remaining(u32),
    Completed,
}

impl ProgressCue {
    pub fn message(self) -> String {
        match self {
            ProgressCue::Remaining(5) => "Only 5 reps left. You can do this!".to_string(),
            ProgressCue::Remaining(n) => n.to_string(),
            ProgressCue::Completed => "Amazing, good job!".to_string(),
        }
    }
}

/// Remaining work on the current exercise
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Reps, or whole seconds for timed exercises
    pub remaining: u32,
    pub is_timed: bool,
    pub completed: bool,
}

/// Progress through one exercise of the plan
#[derive(Clone, Debug)]
pub struct ExerciseProgress {
    descriptor: ExerciseDescriptor,
    reps_done: u32,
    elapsed_frames: u64,
    last_announced: Option<u32>,
    completed: bool,
}

impl ExerciseProgress {
    pub fn new(descriptor: ExerciseDescriptor) -> Self {
        ExerciseProgress {
            descriptor,
            reps_done: 0,
            elapsed_frames: 0,
            last_announced: None,
            completed: false,
        }
    }

    pub fn descriptor(&self) -> &ExerciseDescriptor {
        &self.descriptor
    }

    pub fn reps_done(&self) -> u32 {
        self.reps_done
    }

    /// Count a completed rep; ignored for timed exercises
    pub fn record_rep(&mut self) -> Option<ProgressCue> {
        if self.descriptor.is_timed || self.completed {
            return None;
        }
        self.reps_done = self.reps_done.saturating_add(1);
        self.announce(self.reps_left())
    }

    /// Advance the countdown by one frame
    ///
    /// A rep-based exercise only completes here when its target is already met.
    pub fn tick(&mut self, frame_rate: FrameRate) -> Option<ProgressCue> {
        if self.completed {
            return None;
        }
        if !self.descriptor.is_timed {
            if self.reps_left() == 0 {
                return self.announce(0);
            }
            return None;
        }
        self.elapsed_frames += 1;
        self.announce(self.seconds_left(frame_rate))
    }

    /// Reps left, `max(0, reps × sets − done)`
    pub fn reps_left(&self) -> u32 {
        self.descriptor.target_reps().saturating_sub(self.reps_done)
    }

    /// Whole seconds left on a timed exercise, rounded up
    pub fn seconds_left(&self, frame_rate: FrameRate) -> u32 {
        let left = self.descriptor.reps as f32 - frame_rate.seconds(self.elapsed_frames);
        left.max(0.0).ceil() as u32
    }

    pub fn remaining(&self, frame_rate: FrameRate) -> u32 {
        if self.descriptor.is_timed {
            self.seconds_left(frame_rate)
        } else {
            self.reps_left()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn report(&self, frame_rate: FrameRate) -> ProgressReport {
        ProgressReport {
            remaining: self.remaining(frame_rate),
            is_timed: self.descriptor.is_timed,
            completed: self.completed,
        }
    }

    /// Each remaining count is announced once
    fn announce(&mut self, remaining: u32) -> Option<ProgressCue> {
        if remaining == 0 {
            self.completed = true;
            return Some(ProgressCue::Completed);
        }
        if remaining <= 5 && self.last_announced != Some(remaining) {
            self.last_announced = Some(remaining);
            return Some(ProgressCue::Remaining(remaining));
        }
        None
    }
}
