use serde::Serialize;

use crate::model::{AttemptMetric, Difficulty};

/// A difficulty change applied by the adaptive engine mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyTransition {
    pub from: Difficulty,
    pub to: Difficulty,
    /// 1-based position in the full metric sequence, unattempted rows
    /// included.
    pub position: u32,
}

/// Finds the points where the adaptive engine moved the learner to a
/// different band.
///
/// A transition exists only where the row recorded its previous band and that
/// band differs from the one the question was served at.
#[must_use]
pub fn compute_difficulty_transitions(metrics: &[AttemptMetric]) -> Vec<DifficultyTransition> {
    let mut transitions = Vec::new();
    for (index, metric) in metrics.iter().enumerate() {
        let Some(from) = metric.previous_difficulty else {
            continue;
        };
        if from == metric.difficulty {
            continue;
        }
        transitions.push(DifficultyTransition {
            from,
            to: metric.difficulty,
            position: u32::try_from(index + 1).unwrap_or(u32::MAX),
        });
    }
    transitions
}
