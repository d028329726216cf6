use serde::Serialize;

use crate::model::{AttemptMetric, SessionSummary};

/// Final per-session counts after merging the backend summary over the
/// values derived from the raw metric list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SessionTotals {
    pub total_questions: u32,
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub skipped: u32,
    pub unanswered: u32,
    pub marked: u32,
    pub total_time_seconds: u32,
    pub avg_time_per_question: u32,
    /// Overall accuracy in percent, always recomputed from the reconciled
    /// attempted and correct counts.
    pub accuracy: f64,
}

/// Merges the optional authoritative summary over metric-derived counts.
///
/// Each summary field wins individually; fields the summary omits keep their
/// derived value, so a partial summary never zeroes anything out. Accuracy is
/// recomputed from the merged counts at the end; a stored accuracy column is
/// never trusted, keeping the displayed figures mutually consistent.
#[must_use]
pub fn reconcile_totals(
    metrics: &[AttemptMetric],
    summary: Option<&SessionSummary>,
) -> SessionTotals {
    let mut totals = derive_totals(metrics);

    if let Some(summary) = summary {
        apply(&mut totals.attempted, summary.attempted_count);
        apply(&mut totals.correct, summary.correct_count);
        apply(&mut totals.incorrect, summary.incorrect_count);
        apply(&mut totals.skipped, summary.skipped_count);
        apply(&mut totals.unanswered, summary.unanswered_count);
        apply(&mut totals.marked, summary.marked_count);
        apply(&mut totals.total_questions, summary.total_questions);
        apply(&mut totals.total_time_seconds, summary.total_time_seconds);
        apply(
            &mut totals.avg_time_per_question,
            summary.avg_time_per_question,
        );
    }

    totals.accuracy = if totals.attempted > 0 {
        f64::from(totals.correct) / f64::from(totals.attempted) * 100.0
    } else {
        0.0
    };
    totals
}

fn apply(slot: &mut u32, provided: Option<u32>) {
    if let Some(value) = provided {
        *slot = value;
    }
}

fn derive_totals(metrics: &[AttemptMetric]) -> SessionTotals {
    let mut totals = SessionTotals::default();
    for metric in metrics {
        totals.total_questions = totals.total_questions.saturating_add(1);
        match metric.is_correct {
            Some(true) => {
                totals.attempted += 1;
                totals.correct += 1;
                totals.total_time_seconds = totals
                    .total_time_seconds
                    .saturating_add(metric.time_taken_seconds.unwrap_or(0));
            }
            Some(false) => {
                totals.attempted += 1;
                totals.incorrect += 1;
                totals.total_time_seconds = totals
                    .total_time_seconds
                    .saturating_add(metric.time_taken_seconds.unwrap_or(0));
            }
            // Raw metrics cannot tell a deliberate skip from a question the
            // learner never reached, so unattempted rows all land here.
            None => totals.unanswered += 1,
        }
    }
    if totals.attempted > 0 {
        totals.avg_time_per_question =
            (f64::from(totals.total_time_seconds) / f64::from(totals.attempted)).round() as u32;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, MetricId};

    fn metric(is_correct: Option<bool>, time: u32) -> AttemptMetric {
        let metric = AttemptMetric::new(MetricId::new("m"), Difficulty::Medium);
        match is_correct {
            Some(value) => metric.with_result(value).with_time(time),
            None => metric,
        }
    }

    #[test]
    fn derived_counts_conserve_attempted() {
        let metrics = vec![
            metric(Some(true), 10),
            metric(Some(false), 20),
            metric(Some(false), 5),
            metric(None, 0),
        ];

        let totals = reconcile_totals(&metrics, None);

        assert_eq!(totals.total_questions, 4);
        assert_eq!(totals.attempted, 3);
        assert_eq!(totals.attempted, totals.correct + totals.incorrect);
        assert_eq!(totals.unanswered, 1);
        assert_eq!(totals.total_time_seconds, 35);
        assert_eq!(totals.avg_time_per_question, 12);
    }

    #[test]
    fn summary_counts_take_precedence_field_by_field() {
        // Metrics derive attempted = 5; the summary says 8 and wins.
        let metrics: Vec<AttemptMetric> =
            (0..5).map(|i| metric(Some(i % 2 == 0), 10)).collect();
        let summary = SessionSummary {
            attempted_count: Some(8),
            correct_count: Some(6),
            marked_count: Some(2),
            ..SessionSummary::default()
        };

        let totals = reconcile_totals(&metrics, Some(&summary));

        assert_eq!(totals.attempted, 8);
        assert_eq!(totals.correct, 6);
        assert_eq!(totals.marked, 2);
        // incorrect was not supplied, so the derived value survives.
        assert_eq!(totals.incorrect, 2);
    }

    #[test]
    fn accuracy_is_recomputed_from_reconciled_counts() {
        let metrics = vec![metric(Some(true), 10)];
        let summary = SessionSummary {
            attempted_count: Some(8),
            correct_count: Some(6),
            ..SessionSummary::default()
        };

        let totals = reconcile_totals(&metrics, Some(&summary));

        assert_eq!(totals.accuracy, 75.0);
    }

    #[test]
    fn no_attempts_means_zero_accuracy() {
        let totals = reconcile_totals(&[metric(None, 0)], None);
        assert_eq!(totals.accuracy, 0.0);
    }

    #[test]
    fn empty_summary_changes_nothing() {
        let metrics = vec![metric(Some(true), 10), metric(Some(false), 30)];
        let plain = reconcile_totals(&metrics, None);
        let merged = reconcile_totals(&metrics, Some(&SessionSummary::default()));
        assert_eq!(plain, merged);
    }
}
