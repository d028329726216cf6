//! Pure derived statistics over attempt metrics.
//!
//! Everything here is a total, deterministic transform over rows the backend
//! already wrote: no I/O, no interior state, inputs never mutated. The
//! results and practice-summary views re-run these functions freely on
//! whatever data their last fetch returned.
//!
//! Malformed-but-present data never errors out of this module; defaulting to
//! safe values happens upstream in the gateway's normalization step, so these
//! functions only ever see the strict model types.

mod difficulty;
mod mastery;
mod reconcile;
mod streaks;
mod subcategory;
mod time_stats;
mod transitions;
mod trend;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{AttemptMetric, SessionSummary};

pub use difficulty::{DifficultyBreakdown, DifficultyBucket, compute_difficulty_breakdown};
pub use mastery::{MasteryPoint, MasteryProgression, compute_mastery_progression};
pub use reconcile::{SessionTotals, reconcile_totals};
pub use streaks::{StreakSummary, compute_streaks};
pub use subcategory::{SubcategoryStats, UNKNOWN_SUBCATEGORY, compute_subcategory_breakdown};
pub use time_stats::{TimeStatistics, compute_time_statistics};
pub use transitions::{DifficultyTransition, compute_difficulty_transitions};
pub use trend::{HalfSessionTrend, HalfStats, compute_half_session_trend};

/// Everything the results and practice-summary views need for one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub totals: SessionTotals,
    pub difficulty: DifficultyBreakdown,
    pub subcategories: BTreeMap<String, SubcategoryStats>,
    pub time: TimeStatistics,
    pub streaks: StreakSummary,
    pub trend: HalfSessionTrend,
    pub mastery: MasteryProgression,
    pub transitions: Vec<DifficultyTransition>,
}

impl SessionReport {
    /// Builds the full report with a zero mastery baseline.
    #[must_use]
    pub fn build(metrics: &[AttemptMetric], summary: Option<&SessionSummary>) -> Self {
        Self::build_with_mastery_baseline(metrics, summary, 0.0)
    }

    /// Builds the full report, seeding the mastery curve with the learner's
    /// mastery before the session for sessions that recorded no scores.
    #[must_use]
    pub fn build_with_mastery_baseline(
        metrics: &[AttemptMetric],
        summary: Option<&SessionSummary>,
        mastery_baseline: f64,
    ) -> Self {
        Self {
            totals: reconcile_totals(metrics, summary),
            difficulty: compute_difficulty_breakdown(metrics, summary),
            subcategories: compute_subcategory_breakdown(metrics),
            time: compute_time_statistics(metrics),
            streaks: compute_streaks(metrics),
            trend: compute_half_session_trend(metrics),
            mastery: compute_mastery_progression(metrics, mastery_baseline),
            transitions: compute_difficulty_transitions(metrics),
        }
    }
}
