use serde::Serialize;

use crate::model::AttemptMetric;

/// Time spent across the attempted questions of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeStatistics {
    pub total_seconds: u32,
    pub min_seconds: u32,
    pub max_seconds: u32,
    pub avg_seconds: u32,
}

/// Sums, bounds, and averages time over attempted metrics only.
///
/// A session with no attempted questions yields all zeroes; the minimum is
/// never an infinity sentinel. Attempted rows missing a time column count as
/// zero seconds.
#[must_use]
pub fn compute_time_statistics(metrics: &[AttemptMetric]) -> TimeStatistics {
    let mut stats = TimeStatistics::default();
    let mut count = 0_u32;
    let mut min: Option<u32> = None;

    for metric in metrics.iter().filter(|metric| metric.is_attempted()) {
        let seconds = metric.time_taken_seconds.unwrap_or(0);
        stats.total_seconds = stats.total_seconds.saturating_add(seconds);
        stats.max_seconds = stats.max_seconds.max(seconds);
        min = Some(min.map_or(seconds, |current| current.min(seconds)));
        count += 1;
    }

    stats.min_seconds = min.unwrap_or(0);
    if count > 0 {
        stats.avg_seconds = (f64::from(stats.total_seconds) / f64::from(count)).round() as u32;
    }
    stats
}
