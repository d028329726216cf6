use crate::model::{Difficulty, MetricId};

/// One row per question encountered in a session.
///
/// Produced exactly once by the backend when a test or practice session ends,
/// then read wholesale by the results views. The statistics module only ever
/// derives new values from these rows; it never mutates them.
///
/// `is_correct` is deliberately tri-state: `None` means the question was
/// never attempted, which excludes the row from accuracy, time, and streak
/// computations.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptMetric {
    pub id: MetricId,
    pub difficulty: Difficulty,
    /// Band the learner was in before the adaptive engine placed this
    /// question; present only when the engine recorded a step.
    pub previous_difficulty: Option<Difficulty>,
    pub subcategory: Option<String>,
    pub is_correct: Option<bool>,
    pub time_taken_seconds: Option<u32>,
    /// Mastery score in `0..=1` after answering, when the adaptive engine
    /// recorded one.
    pub mastery_after: Option<f64>,
}

impl AttemptMetric {
    #[must_use]
    pub fn new(id: MetricId, difficulty: Difficulty) -> Self {
        Self {
            id,
            difficulty,
            previous_difficulty: None,
            subcategory: None,
            is_correct: None,
            time_taken_seconds: None,
            mastery_after: None,
        }
    }

    #[must_use]
    pub fn with_subcategory(mut self, name: impl Into<String>) -> Self {
        self.subcategory = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_result(mut self, is_correct: bool) -> Self {
        self.is_correct = Some(is_correct);
        self
    }

    #[must_use]
    pub fn with_time(mut self, seconds: u32) -> Self {
        self.time_taken_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_mastery(mut self, score: f64) -> Self {
        self.mastery_after = Some(score);
        self
    }

    #[must_use]
    pub fn with_previous_difficulty(mut self, band: Difficulty) -> Self {
        self.previous_difficulty = Some(band);
        self
    }

    /// True when the learner actually answered this question.
    #[must_use]
    pub fn is_attempted(&self) -> bool {
        self.is_correct.is_some()
    }
}
