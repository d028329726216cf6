use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::Difficulty;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("attempted count ({attempted}) does not match correct + incorrect ({sum})")]
    CountMismatch { attempted: u32, sum: u32 },

    #[error("attempted + skipped + unanswered ({accounted}) exceeds total questions ({total})")]
    TotalOverflow { total: u32, accounted: u32 },
}

/// Per-band counts as the backend stores them.
///
/// `accuracy` is the stored band accuracy in percent; it exists so the
/// attempted count can be back-calculated for schema generations that never
/// persisted one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DifficultyTotals {
    pub total: Option<u32>,
    pub correct: Option<u32>,
    pub accuracy: Option<f64>,
}

impl DifficultyTotals {
    /// True when the band carries enough data to stand in for counts derived
    /// from the raw metric list.
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        self.total.is_some() && self.correct.is_some()
    }
}

/// Precomputed aggregate counts written by the backend when a session ends.
///
/// Every field is optional: the summary table grew columns over time, and
/// older sessions carry only a subset. A supplied field is authoritative and
/// takes precedence over the value the statistics module derives from the raw
/// metric list; a missing field falls back to the derived value. Presence is
/// modeled with `Option` rather than sentinel values so the override
/// semantics stay explicit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub attempted_count: Option<u32>,
    pub correct_count: Option<u32>,
    pub incorrect_count: Option<u32>,
    pub skipped_count: Option<u32>,
    pub unanswered_count: Option<u32>,
    pub marked_count: Option<u32>,
    pub total_questions: Option<u32>,
    pub total_time_seconds: Option<u32>,
    pub avg_time_per_question: Option<u32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub easy: DifficultyTotals,
    pub medium: DifficultyTotals,
    pub hard: DifficultyTotals,
}

impl SessionSummary {
    /// Returns the stored totals for one band.
    #[must_use]
    pub fn band(&self, difficulty: Difficulty) -> &DifficultyTotals {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Checks the internal count invariants.
    ///
    /// Attempted questions are disjoint from skipped and unanswered ones, so
    /// `attempted == correct + incorrect` and the three groups together can
    /// never exceed the question total. Each check only fires when every
    /// field it involves was actually supplied.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::CountMismatch` or
    /// `SessionSummaryError::TotalOverflow` when the stored counts disagree.
    pub fn validate(&self) -> Result<(), SessionSummaryError> {
        if let (Some(attempted), Some(correct), Some(incorrect)) = (
            self.attempted_count,
            self.correct_count,
            self.incorrect_count,
        ) {
            let sum = correct.saturating_add(incorrect);
            if sum != attempted {
                return Err(SessionSummaryError::CountMismatch { attempted, sum });
            }
        }

        if let Some(total) = self.total_questions {
            let accounted = self
                .attempted_count
                .unwrap_or(0)
                .saturating_add(self.skipped_count.unwrap_or(0))
                .saturating_add(self.unanswered_count.unwrap_or(0));
            if accounted > total {
                return Err(SessionSummaryError::TotalOverflow { total, accounted });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_is_valid() {
        assert_eq!(SessionSummary::default().validate(), Ok(()));
    }

    #[test]
    fn consistent_counts_pass() {
        let summary = SessionSummary {
            attempted_count: Some(8),
            correct_count: Some(5),
            incorrect_count: Some(3),
            skipped_count: Some(1),
            unanswered_count: Some(1),
            total_questions: Some(10),
            ..SessionSummary::default()
        };
        assert_eq!(summary.validate(), Ok(()));
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let summary = SessionSummary {
            attempted_count: Some(8),
            correct_count: Some(5),
            incorrect_count: Some(2),
            ..SessionSummary::default()
        };
        let err = summary.validate().unwrap_err();
        assert_eq!(
            err,
            SessionSummaryError::CountMismatch {
                attempted: 8,
                sum: 7
            }
        );
    }

    #[test]
    fn partial_counts_skip_the_mismatch_check() {
        // No incorrect_count stored, so attempted == correct + incorrect
        // cannot be checked.
        let summary = SessionSummary {
            attempted_count: Some(8),
            correct_count: Some(5),
            ..SessionSummary::default()
        };
        assert_eq!(summary.validate(), Ok(()));
    }

    #[test]
    fn overflowing_question_total_is_rejected() {
        let summary = SessionSummary {
            attempted_count: Some(8),
            skipped_count: Some(2),
            unanswered_count: Some(1),
            total_questions: Some(10),
            ..SessionSummary::default()
        };
        let err = summary.validate().unwrap_err();
        assert_eq!(
            err,
            SessionSummaryError::TotalOverflow {
                total: 10,
                accounted: 11
            }
        );
    }

    #[test]
    fn band_lookup_matches_fields() {
        let summary = SessionSummary {
            hard: DifficultyTotals {
                total: Some(4),
                correct: Some(1),
                accuracy: Some(25.0),
            },
            ..SessionSummary::default()
        };
        assert_eq!(summary.band(Difficulty::Hard).total, Some(4));
        assert!(!summary.band(Difficulty::Easy).is_authoritative());
        assert!(summary.band(Difficulty::Hard).is_authoritative());
    }
}
