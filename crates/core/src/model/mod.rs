mod difficulty;
mod ids;
mod metric;
mod summary;

pub use difficulty::Difficulty;
pub use ids::{MetricId, ParseIdError, QuestionId, SessionId};
pub use metric::AttemptMetric;
pub use summary::{DifficultyTotals, SessionSummary, SessionSummaryError};
