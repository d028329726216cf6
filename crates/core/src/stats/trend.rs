use serde::Serialize;

use crate::model::AttemptMetric;

/// Accuracy over one positional half of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HalfStats {
    pub attempted: u32,
    pub correct: u32,
    pub accuracy: f64,
}

/// Comparison of first-half and second-half accuracy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HalfSessionTrend {
    pub first: HalfStats,
    pub second: HalfStats,
    /// Second-half accuracy minus first-half accuracy; positive means the
    /// learner improved as the session went on.
    pub trend: f64,
}

/// Splits the session at the positional midpoint and compares accuracies.
///
/// The split is purely positional: the first half gets `floor(len / 2)`
/// entries, so an odd-length session puts the extra question in the second
/// half. A half with no attempted questions reads as 0% accuracy.
#[must_use]
pub fn compute_half_session_trend(metrics: &[AttemptMetric]) -> HalfSessionTrend {
    let (first, second) = metrics.split_at(metrics.len() / 2);
    let first = half_stats(first);
    let second = half_stats(second);
    HalfSessionTrend {
        first,
        second,
        trend: second.accuracy - first.accuracy,
    }
}

fn half_stats(metrics: &[AttemptMetric]) -> HalfStats {
    let mut stats = HalfStats::default();
    for metric in metrics.iter().filter(|metric| metric.is_attempted()) {
        stats.attempted += 1;
        if metric.is_correct == Some(true) {
            stats.correct += 1;
        }
    }
    if stats.attempted > 0 {
        stats.accuracy = f64::from(stats.correct) / f64::from(stats.attempted) * 100.0;
    }
    stats
}
