use serde::Serialize;

use crate::model::{AttemptMetric, Difficulty};

/// One plotted point on the mastery progression curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MasteryPoint {
    /// 1-based position among the metrics that recorded a mastery score.
    pub index: u32,
    /// Mastery after this question, in percent, one decimal place.
    pub mastery_percent: f64,
    pub difficulty: Difficulty,
}

/// Mastery trajectory across a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasteryProgression {
    pub points: Vec<MasteryPoint>,
    /// First recorded raw score, or the caller's baseline when the session
    /// recorded none.
    pub starting: f64,
    /// Last recorded raw score, or the baseline when the session recorded
    /// none.
    pub ending: f64,
    pub change: f64,
}

/// Extracts the mastery curve from the rows that carry a score.
///
/// Rows without a score are dropped entirely; indices are positions in the
/// filtered sequence, since that is what gets plotted.
#[must_use]
pub fn compute_mastery_progression(metrics: &[AttemptMetric], baseline: f64) -> MasteryProgression {
    let mut points = Vec::new();
    for metric in metrics {
        let Some(score) = metric.mastery_after else {
            continue;
        };
        points.push(MasteryPoint {
            index: u32::try_from(points.len() + 1).unwrap_or(u32::MAX),
            mastery_percent: round_to_tenth(score * 100.0),
            difficulty: metric.difficulty,
        });
    }

    let starting = metrics
        .iter()
        .find_map(|metric| metric.mastery_after)
        .unwrap_or(baseline);
    let ending = metrics
        .iter()
        .rev()
        .find_map(|metric| metric.mastery_after)
        .unwrap_or(baseline);

    MasteryProgression {
        points,
        starting,
        ending,
        change: ending - starting,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MetricId;

    fn with_mastery(difficulty: Difficulty, score: f64) -> AttemptMetric {
        AttemptMetric::new(MetricId::new("m"), difficulty)
            .with_result(true)
            .with_mastery(score)
    }

    fn without_mastery() -> AttemptMetric {
        AttemptMetric::new(MetricId::new("m"), Difficulty::Medium)
    }

    #[test]
    fn indices_count_only_scored_rows() {
        let metrics = vec![
            with_mastery(Difficulty::Easy, 0.40),
            without_mastery(),
            with_mastery(Difficulty::Medium, 0.55),
        ];

        let progression = compute_mastery_progression(&metrics, 0.0);

        assert_eq!(progression.points.len(), 2);
        assert_eq!(progression.points[0].index, 1);
        assert_eq!(progression.points[1].index, 2);
        assert_eq!(progression.points[1].difficulty, Difficulty::Medium);
    }

    #[test]
    fn percent_is_rounded_to_one_decimal() {
        let metrics = vec![with_mastery(Difficulty::Hard, 0.5555)];
        let progression = compute_mastery_progression(&metrics, 0.0);
        assert_eq!(progression.points[0].mastery_percent, 55.6);
    }

    #[test]
    fn starting_and_ending_bracket_the_recorded_scores() {
        let metrics = vec![
            with_mastery(Difficulty::Easy, 0.30),
            with_mastery(Difficulty::Easy, 0.45),
            with_mastery(Difficulty::Medium, 0.60),
        ];

        let progression = compute_mastery_progression(&metrics, 0.0);

        assert_eq!(progression.starting, 0.30);
        assert_eq!(progression.ending, 0.60);
        assert!((progression.change - 0.30).abs() < 1e-9);
    }

    #[test]
    fn empty_curve_falls_back_to_the_baseline() {
        let metrics = vec![without_mastery()];
        let progression = compute_mastery_progression(&metrics, 0.5);
        assert!(progression.points.is_empty());
        assert_eq!(progression.starting, 0.5);
        assert_eq!(progression.ending, 0.5);
        assert_eq!(progression.change, 0.0);
    }
}
