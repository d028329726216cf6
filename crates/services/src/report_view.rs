use chrono::{DateTime, Utc};

use aptly_core::model::SessionId;
use aptly_core::stats::{SessionReport, SessionTotals};

/// Presentation-agnostic payload for a session results view.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings (beyond the opaque motivation copy)
/// - no localization assumptions
///
/// The UI may format timestamps and percentages as needed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDetail {
    pub session_id: SessionId,
    /// When this report was computed, from the service clock.
    pub generated_at: DateTime<Utc>,
    /// When the backend recorded the session as finished, if known.
    pub completed_at: Option<DateTime<Utc>>,
    pub report: SessionReport,
    pub motivation_label: Option<String>,
}

/// List item for dashboard "recent sessions" panels.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportListItem {
    pub session_id: SessionId,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_questions: u32,
    pub attempted: u32,
    pub correct: u32,
    pub accuracy: f64,
}

impl ReportListItem {
    #[must_use]
    pub fn from_detail(detail: &ReportDetail) -> Self {
        Self::from_totals(detail.session_id, detail.completed_at, &detail.report.totals)
    }

    #[must_use]
    pub fn from_totals(
        session_id: SessionId,
        completed_at: Option<DateTime<Utc>>,
        totals: &SessionTotals,
    ) -> Self {
        Self {
            session_id,
            completed_at,
            total_questions: totals.total_questions,
            attempted: totals.attempted,
            correct: totals.correct,
            accuracy: totals.accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn list_item_carries_reconciled_totals() {
        let totals = SessionTotals {
            total_questions: 10,
            attempted: 8,
            correct: 6,
            incorrect: 2,
            accuracy: 75.0,
            ..SessionTotals::default()
        };
        let item = ReportListItem::from_totals(
            SessionId::new(Uuid::from_u128(1)),
            None,
            &totals,
        );
        assert_eq!(item.attempted, 8);
        assert_eq!(item.accuracy, 75.0);
        assert_eq!(item.completed_at, None);
    }
}
