//! Workout plan - ordered exercise queue and completion score

use tracing::info;

use reptrack_core::ExerciseDescriptor;

/// Points awarded per completed exercise
pub const COMPLETION_POINTS: u32 = 10;

/// Ordered list of exercises worked through one at a time
#[derive(Clone, Debug, Default)]
pub struct WorkoutPlan {
    exercises: Vec<ExerciseDescriptor>,
    current: usize,
    completed: usize,
    score: u32,
}

impl WorkoutPlan {
    pub fn new(exercises: Vec<ExerciseDescriptor>) -> Self {
        WorkoutPlan {
            exercises,
            current: 0,
            completed: 0,
            score: 0,
        }
    }

    pub fn current(&self) -> Option<&ExerciseDescriptor> {
        self.exercises.get(self.current)
    }

    /// Mark the current exercise done, award points, move to the next
    pub fn complete_current(&mut self) -> Option<&ExerciseDescriptor> {
        if let Some(done) = self.exercises.get(self.current) {
            self.completed += 1;
            self.score += COMPLETION_POINTS;
            info!(exercise = %done.name, score = self.score, "exercise completed");
        }
        self.skip()
    }

    /// Move on without credit
    pub fn skip(&mut self) -> Option<&ExerciseDescriptor> {
        if self.current < self.exercises.len() {
            self.current += 1;
        }
        self.current()
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.exercises.len()
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}
