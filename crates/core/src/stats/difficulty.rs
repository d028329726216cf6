use serde::Serialize;

use crate::model::{AttemptMetric, Difficulty, SessionSummary};

/// Counts for one difficulty band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBucket {
    pub total: u32,
    pub correct: u32,
    pub attempted: u32,
}

impl DifficultyBucket {
    /// Questions answered but not answered correctly.
    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.attempted.saturating_sub(self.correct)
    }

    /// Share of attempted questions answered correctly, in percent.
    ///
    /// A band nobody attempted reads as 0, not as a division by zero.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempted) * 100.0
        }
    }
}

/// Per-band counts for a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyBreakdown {
    pub easy: DifficultyBucket,
    pub medium: DifficultyBucket,
    pub hard: DifficultyBucket,
}

impl DifficultyBreakdown {
    #[must_use]
    pub fn band(&self, difficulty: Difficulty) -> &DifficultyBucket {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn band_mut(&mut self, difficulty: Difficulty) -> &mut DifficultyBucket {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }
}

/// Per-band counts, preferring the stored summary where it covers a band.
///
/// A band the summary covers (both total and correct present) is taken from
/// the summary, with its attempted count back-calculated from the stored band
/// accuracy. Bands the summary does not cover keep the counts folded from the
/// metric list, so a partial summary never wipes out derived data.
#[must_use]
pub fn compute_difficulty_breakdown(
    metrics: &[AttemptMetric],
    summary: Option<&SessionSummary>,
) -> DifficultyBreakdown {
    let mut breakdown = fold_metrics(metrics);
    let Some(summary) = summary else {
        return breakdown;
    };

    for difficulty in Difficulty::ALL {
        let stored = summary.band(difficulty);
        if !stored.is_authoritative() {
            continue;
        }
        let band = breakdown.band_mut(difficulty);
        band.total = stored.total.unwrap_or(0);
        band.correct = stored.correct.unwrap_or(0);
        band.attempted = back_calculated_attempted(band.correct, stored.accuracy);
    }
    breakdown
}

fn fold_metrics(metrics: &[AttemptMetric]) -> DifficultyBreakdown {
    let mut breakdown = DifficultyBreakdown::default();
    for metric in metrics {
        let band = breakdown.band_mut(metric.difficulty);
        band.total = band.total.saturating_add(1);
        if metric.is_attempted() {
            band.attempted = band.attempted.saturating_add(1);
            if metric.is_correct == Some(true) {
                band.correct = band.correct.saturating_add(1);
            }
        }
    }
    breakdown
}

/// Recovers the attempted count from the stored correct count and band
/// accuracy: `attempted = round(correct / (accuracy / 100))`.
///
/// A missing or zero accuracy yields zero attempted rather than dividing by
/// zero.
fn back_calculated_attempted(correct: u32, accuracy: Option<f64>) -> u32 {
    match accuracy {
        Some(accuracy) if accuracy > 0.0 => {
            (f64::from(correct) / (accuracy / 100.0)).round() as u32
        }
        _ => 0,
    }
}
