//! Adapter from loose wire rows to the strict domain model.
//!
//! All defaulting lives here so the statistics module never has to cope with
//! ecosystem quirks: unknown difficulty spellings become `Medium`, negative
//! times clamp to zero, fractional seconds round, mastery scores clamp into
//! `0..=1`. Malformed-but-present data is always normalized, never an error;
//! the only hard failure at this boundary is a response body that does not
//! decode at all, which surfaces as [`crate::GatewayError::Decode`] upstream.

use aptly_core::model::{
    AttemptMetric, Difficulty, DifficultyTotals, MetricId, SessionSummary,
};
use tracing::warn;

use crate::rows::{AttemptMetricRow, RowId, SessionSummaryRow};

/// Normalizes one metric row.
#[must_use]
pub fn attempt_metric(row: &AttemptMetricRow) -> AttemptMetric {
    let question = row.question.as_ref();

    // Difficulty lives on the metric for adaptive sessions and on the joined
    // question for fixed tests; either may be missing on old rows.
    let difficulty = parse_difficulty(row.difficulty.as_deref())
        .or_else(|| parse_difficulty(question.and_then(|q| q.difficulty.as_deref())))
        .unwrap_or_default();

    let subcategory = non_blank(row.subcategory_name.as_deref())
        .or_else(|| non_blank(question.and_then(|q| q.subcategory_name.as_deref())))
        .map(ToOwned::to_owned);

    AttemptMetric {
        id: metric_id(row.id.as_ref()),
        difficulty,
        previous_difficulty: parse_difficulty(row.previous_difficulty.as_deref()),
        subcategory,
        is_correct: row.is_correct,
        time_taken_seconds: seconds(row.time_taken_seconds),
        mastery_after: mastery(row.mastery_score_after),
    }
}

/// Normalizes a full result set, preserving row order.
#[must_use]
pub fn attempt_metrics(rows: &[AttemptMetricRow]) -> Vec<AttemptMetric> {
    rows.iter().map(attempt_metric).collect()
}

/// Normalizes a summary row, dropping it when its counts are inconsistent.
///
/// A summary that fails validation would poison every count it overrides, so
/// reconciliation falls back to metric-derived values instead.
#[must_use]
pub fn session_summary(row: &SessionSummaryRow) -> Option<SessionSummary> {
    let summary = SessionSummary {
        attempted_count: count(row.attempted_count),
        correct_count: count(row.correct_count),
        incorrect_count: count(row.incorrect_count),
        skipped_count: count(row.skipped_count),
        unanswered_count: count(row.unanswered_count),
        marked_count: count(row.marked_count),
        total_questions: count(row.total_questions),
        total_time_seconds: seconds(row.total_time_seconds),
        avg_time_per_question: seconds(row.avg_time_per_question),
        completed_at: row.completed_at,
        easy: band(row.easy_total, row.easy_correct, row.easy_accuracy),
        medium: band(row.medium_total, row.medium_correct, row.medium_accuracy),
        hard: band(row.hard_total, row.hard_correct, row.hard_accuracy),
    };

    match summary.validate() {
        Ok(()) => Some(summary),
        Err(err) => {
            warn!(%err, "discarding inconsistent session summary");
            None
        }
    }
}

fn parse_difficulty(value: Option<&str>) -> Option<Difficulty> {
    value.and_then(Difficulty::parse)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn metric_id(id: Option<&RowId>) -> MetricId {
    match id {
        Some(RowId::Number(n)) => MetricId::new(n.to_string()),
        Some(RowId::Text(s)) => MetricId::new(s.clone()),
        None => MetricId::default(),
    }
}

/// Whole seconds from a possibly fractional, possibly negative column.
fn seconds(value: Option<f64>) -> Option<u32> {
    value.map(|raw| {
        if raw.is_finite() {
            raw.max(0.0).round() as u32
        } else {
            0
        }
    })
}

fn mastery(value: Option<f64>) -> Option<f64> {
    value.map(|raw| if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 })
}

fn count(value: Option<i64>) -> Option<u32> {
    value.map(|raw| u32::try_from(raw.max(0)).unwrap_or(u32::MAX))
}

fn band(total: Option<i64>, correct: Option<i64>, accuracy: Option<f64>) -> DifficultyTotals {
    DifficultyTotals {
        total: count(total),
        correct: count(correct),
        accuracy: accuracy.filter(|value| value.is_finite()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::QuestionRow;

    #[test]
    fn metric_difficulty_prefers_the_row_then_the_question() {
        let row = AttemptMetricRow {
            difficulty: Some("hard".into()),
            question: Some(QuestionRow {
                difficulty: Some("easy".into()),
                ..QuestionRow::default()
            }),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&row).difficulty, Difficulty::Hard);

        let fallback = AttemptMetricRow {
            question: Some(QuestionRow {
                difficulty: Some("easy".into()),
                ..QuestionRow::default()
            }),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&fallback).difficulty, Difficulty::Easy);
    }

    #[test]
    fn unknown_or_missing_difficulty_defaults_to_medium() {
        let row = AttemptMetricRow {
            difficulty: Some("impossible".into()),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&row).difficulty, Difficulty::Medium);
        assert_eq!(
            attempt_metric(&AttemptMetricRow::default()).difficulty,
            Difficulty::Medium
        );
    }

    #[test]
    fn times_are_clamped_and_rounded() {
        let row = AttemptMetricRow {
            time_taken_seconds: Some(14.6),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&row).time_taken_seconds, Some(15));

        let negative = AttemptMetricRow {
            time_taken_seconds: Some(-3.0),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&negative).time_taken_seconds, Some(0));
    }

    #[test]
    fn mastery_scores_are_clamped_into_unit_range() {
        let row = AttemptMetricRow {
            mastery_score_after: Some(1.7),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&row).mastery_after, Some(1.0));
    }

    #[test]
    fn blank_subcategories_normalize_to_none() {
        let row = AttemptMetricRow {
            subcategory_name: Some("   ".into()),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&row).subcategory, None);
    }

    #[test]
    fn numeric_row_ids_become_strings() {
        let row = AttemptMetricRow {
            id: Some(RowId::Number(1042)),
            ..AttemptMetricRow::default()
        };
        assert_eq!(attempt_metric(&row).id.as_str(), "1042");
    }

    #[test]
    fn consistent_summary_survives_normalization() {
        let row = SessionSummaryRow {
            attempted_count: Some(8),
            correct_count: Some(5),
            incorrect_count: Some(3),
            easy_total: Some(4),
            easy_correct: Some(3),
            easy_accuracy: Some(75.0),
            ..SessionSummaryRow::default()
        };

        let summary = session_summary(&row).expect("summary should be kept");
        assert_eq!(summary.attempted_count, Some(8));
        assert_eq!(summary.easy.total, Some(4));
        assert_eq!(summary.easy.accuracy, Some(75.0));
    }

    #[test]
    fn inconsistent_summary_is_dropped() {
        let row = SessionSummaryRow {
            attempted_count: Some(8),
            correct_count: Some(5),
            incorrect_count: Some(1),
            ..SessionSummaryRow::default()
        };
        assert!(session_summary(&row).is_none());
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let row = SessionSummaryRow {
            skipped_count: Some(-2),
            ..SessionSummaryRow::default()
        };
        let summary = session_summary(&row).expect("summary should be kept");
        assert_eq!(summary.skipped_count, Some(0));
    }
}
