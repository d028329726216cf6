use aptly_core::model::Difficulty;
use aptly_core::stats::SessionReport;
use gateway::normalize;
use gateway::rows::{AttemptMetricRow, SessionSummaryRow};

// A response body mixing every schema generation the backend still serves:
// integer and uuid row ids, both question-join spellings, fractional and
// missing times, and a row with no difficulty anywhere.
const METRIC_BODY: &str = r#"[
    {
        "id": 1,
        "difficulty": "easy",
        "subcategory_name": "Algebra",
        "is_correct": true,
        "time_taken_seconds": 10.4,
        "mastery_score_after": 0.41,
        "question": {"difficulty": "easy", "correct_answer": "x=2"}
    },
    {
        "id": "9f31",
        "is_correct": false,
        "time_taken_seconds": 20,
        "questions": {"difficulty": "easy", "subcategory_name": "Algebra", "correct answer": "7"}
    },
    {
        "id": 3,
        "difficulty": "hard",
        "previous_difficulty": "easy",
        "is_correct": null
    },
    {
        "id": 4,
        "difficulty": "medium",
        "previous_difficulty": "hard",
        "subcategory_name": "Geometry",
        "is_correct": true,
        "time_taken_seconds": 15,
        "mastery_score_after": 0.52
    }
]"#;

const SUMMARY_BODY: &str = r#"[
    {
        "attempted_count": 3,
        "correct_count": 2,
        "incorrect_count": 1,
        "unanswered_count": 1,
        "total_questions": 4,
        "total_time_seconds": 45,
        "easy_total": 2,
        "easy_correct": 1,
        "easy_accuracy": 50.0
    }
]"#;

#[test]
fn messy_wire_rows_produce_a_consistent_report() {
    let rows: Vec<AttemptMetricRow> = serde_json::from_str(METRIC_BODY).unwrap();
    let metrics = normalize::attempt_metrics(&rows);

    assert_eq!(metrics.len(), 4);
    // Second row had no metric-level difficulty; the joined question fills it.
    assert_eq!(metrics[1].difficulty, Difficulty::Easy);
    assert_eq!(metrics[1].subcategory.as_deref(), Some("Algebra"));
    // Fractional time rounds.
    assert_eq!(metrics[0].time_taken_seconds, Some(10));

    let summary_rows: Vec<SessionSummaryRow> = serde_json::from_str(SUMMARY_BODY).unwrap();
    let summary = summary_rows.first().and_then(normalize::session_summary);
    let summary = summary.expect("consistent summary should survive");

    let report = SessionReport::build(&metrics, Some(&summary));

    // Reconciled counts come from the summary where supplied.
    assert_eq!(report.totals.attempted, 3);
    assert_eq!(report.totals.correct, 2);
    assert_eq!(report.totals.unanswered, 1);
    assert!((report.totals.accuracy - 200.0 / 3.0).abs() < 1e-9);

    // The easy band is summary-backed: attempted back-calculated from the
    // stored 50% accuracy.
    assert_eq!(report.totals.total_questions, 4);
    assert_eq!(report.difficulty.easy.total, 2);
    assert_eq!(report.difficulty.easy.attempted, 2);

    // Adaptive band steps recorded on rows 3 and 4.
    assert_eq!(report.transitions.len(), 2);
    assert_eq!(report.transitions[0].position, 3);

    // Mastery curve only sees the two scored rows.
    assert_eq!(report.mastery.points.len(), 2);
    assert_eq!(report.mastery.starting, 0.41);
    assert_eq!(report.mastery.ending, 0.52);
}

#[test]
fn inconsistent_summary_falls_back_to_derived_counts() {
    let rows: Vec<AttemptMetricRow> = serde_json::from_str(METRIC_BODY).unwrap();
    let metrics = normalize::attempt_metrics(&rows);

    let bad: Vec<SessionSummaryRow> = serde_json::from_str(
        r#"[{"attempted_count": 9, "correct_count": 2, "incorrect_count": 1}]"#,
    )
    .unwrap();
    let summary = bad.first().and_then(normalize::session_summary);
    assert!(summary.is_none());

    let report = SessionReport::build(&metrics, summary.as_ref());
    assert_eq!(report.totals.attempted, 3);
    assert_eq!(report.totals.attempted, report.totals.correct + report.totals.incorrect);
}
