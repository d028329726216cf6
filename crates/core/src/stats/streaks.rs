use serde::Serialize;

use crate::model::AttemptMetric;

/// Longest runs of consecutive correct and incorrect answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub longest_correct: u32,
    pub longest_incorrect: u32,
}

/// Walks the session in order, tracking both streak counters.
///
/// A correct answer extends the correct run and resets the incorrect run;
/// an incorrect answer does the opposite. An unattempted question is a
/// complete no-op: it neither extends nor resets either run, so a streak
/// survives a skipped question in the middle of it.
#[must_use]
pub fn compute_streaks(metrics: &[AttemptMetric]) -> StreakSummary {
    let mut summary = StreakSummary::default();
    let mut correct_run = 0_u32;
    let mut incorrect_run = 0_u32;

    for metric in metrics {
        match metric.is_correct {
            Some(true) => {
                correct_run += 1;
                incorrect_run = 0;
                summary.longest_correct = summary.longest_correct.max(correct_run);
            }
            Some(false) => {
                incorrect_run += 1;
                correct_run = 0;
                summary.longest_incorrect = summary.longest_incorrect.max(incorrect_run);
            }
            None => {}
        }
    }
    summary
}
