use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::AttemptMetric;

/// Group label for metrics that carry no subcategory.
pub const UNKNOWN_SUBCATEGORY: &str = "Unknown";

/// Accumulated counts for one subcategory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubcategoryStats {
    pub total: u32,
    pub attempted: u32,
    pub correct: u32,
    pub total_time_seconds: u32,
}

impl SubcategoryStats {
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.attempted.saturating_sub(self.correct)
    }

    /// Share of attempted questions answered correctly, in percent.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempted) * 100.0
        }
    }

    /// Average seconds per attempted question, rounded to the nearest second.
    #[must_use]
    pub fn avg_time_seconds(&self) -> u32 {
        if self.attempted == 0 {
            0
        } else {
            (f64::from(self.total_time_seconds) / f64::from(self.attempted)).round() as u32
        }
    }
}

/// Groups metrics by subcategory name.
///
/// Missing and blank names land in the `"Unknown"` group. Time accumulates
/// for attempted questions only, matching the time-statistics rules. The
/// `BTreeMap` keeps group order stable across calls.
#[must_use]
pub fn compute_subcategory_breakdown(
    metrics: &[AttemptMetric],
) -> BTreeMap<String, SubcategoryStats> {
    let mut groups: BTreeMap<String, SubcategoryStats> = BTreeMap::new();
    for metric in metrics {
        let name = metric
            .subcategory
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_SUBCATEGORY);

        let stats = groups.entry(name.to_string()).or_default();
        stats.total = stats.total.saturating_add(1);
        if metric.is_attempted() {
            stats.attempted = stats.attempted.saturating_add(1);
            stats.total_time_seconds = stats
                .total_time_seconds
                .saturating_add(metric.time_taken_seconds.unwrap_or(0));
            if metric.is_correct == Some(true) {
                stats.correct = stats.correct.saturating_add(1);
            }
        }
    }
    groups
}
