//! Raw row shapes as the hosted backend returns them.
//!
//! These are deliberately loose: every column is optional, numeric columns
//! may arrive as floats, and several fields exist under more than one name
//! across schema generations. [`crate::normalize`] turns them into the
//! strict domain model; nothing outside this crate should ever see a row.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Row ids arrive as integers from older tables and UUID strings from newer
/// ones.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Number(i64),
    Text(String),
}

/// One `attempt_metrics` row, possibly with its question joined in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttemptMetricRow {
    pub id: Option<RowId>,
    pub difficulty: Option<String>,
    pub previous_difficulty: Option<String>,
    pub subcategory_name: Option<String>,
    pub is_correct: Option<bool>,
    pub time_taken_seconds: Option<f64>,
    pub mastery_score_after: Option<f64>,
    /// Joined question reference. The relationship was renamed at some
    /// point, so both spellings appear in the wild.
    #[serde(alias = "questions")]
    pub question: Option<QuestionRow>,
}

/// Joined `questions` columns used as fallbacks for metric-level fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuestionRow {
    pub difficulty: Option<String>,
    pub subcategory_name: Option<String>,
    /// Legacy rows used a spaced column name.
    #[serde(alias = "correct answer")]
    pub correct_answer: Option<String>,
}

/// One `session_summaries` row.
///
/// Per-difficulty aggregates are flat columns, one triple per band.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionSummaryRow {
    pub attempted_count: Option<i64>,
    pub correct_count: Option<i64>,
    pub incorrect_count: Option<i64>,
    pub skipped_count: Option<i64>,
    pub unanswered_count: Option<i64>,
    pub marked_count: Option<i64>,
    pub total_questions: Option<i64>,
    pub total_time_seconds: Option<f64>,
    pub avg_time_per_question: Option<f64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub easy_total: Option<i64>,
    pub easy_correct: Option<i64>,
    pub easy_accuracy: Option<f64>,
    pub medium_total: Option<i64>,
    pub medium_correct: Option<i64>,
    pub medium_accuracy: Option<f64>,
    pub hard_total: Option<i64>,
    pub hard_correct: Option<i64>,
    pub hard_accuracy: Option<f64>,
}
