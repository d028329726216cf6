use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use aptly_core::Clock;
use aptly_core::model::SessionId;
use aptly_core::stats::SessionReport;
use gateway::{InMemorySource, MetricsSource};

use crate::error::ReportServiceError;
use crate::motivation::MotivationCalculator;
use crate::report_view::ReportDetail;

/// Facade that turns one session's remote rows into a full derived report.
///
/// This service owns:
/// - the time source (`Clock`)
/// - data access behind [`MetricsSource`]
///
/// It does **not** own UI formatting, and it imposes no retry policy: a
/// failed fetch is the caller's to retry, after which re-running this on the
/// same stored rows yields an identical report.
#[derive(Clone)]
pub struct SessionReportService {
    clock: Clock,
    source: Arc<dyn MetricsSource>,
    motivation: Option<Arc<dyn MotivationCalculator>>,
}

impl SessionReportService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn MetricsSource>) -> Self {
        Self {
            clock,
            source,
            motivation: None,
        }
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(clock, Arc::new(InMemorySource::new()))
    }

    /// Attaches the externally supplied percentile/achievement calculator.
    #[must_use]
    pub fn with_motivation(mut self, motivation: Arc<dyn MotivationCalculator>) -> Self {
        self.motivation = Some(motivation);
        self
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Builds the full derived report for a session.
    ///
    /// # Errors
    ///
    /// Returns `ReportServiceError::Gateway` when either backend read fails.
    pub async fn session_report(
        &self,
        session_id: SessionId,
    ) -> Result<ReportDetail, ReportServiceError> {
        self.session_report_with_baseline(session_id, 0.0).await
    }

    /// Builds the report, seeding the mastery curve with the learner's
    /// mastery before this session.
    ///
    /// # Errors
    ///
    /// Returns `ReportServiceError::Gateway` when either backend read fails.
    pub async fn session_report_with_baseline(
        &self,
        session_id: SessionId,
        mastery_baseline: f64,
    ) -> Result<ReportDetail, ReportServiceError> {
        let metrics = self.source.list_attempt_metrics(session_id).await?;
        let summary = self.source.get_session_summary(session_id).await?;
        debug!(
            %session_id,
            rows = metrics.len(),
            has_summary = summary.is_some(),
            "building session report"
        );

        let report =
            SessionReport::build_with_mastery_baseline(&metrics, summary.as_ref(), mastery_baseline);
        let motivation_label = self
            .motivation
            .as_ref()
            .and_then(|calculator| calculator.percentile_label(&report.totals));

        Ok(ReportDetail {
            session_id,
            generated_at: self.clock.now(),
            completed_at: summary.as_ref().and_then(|summary| summary.completed_at),
            report,
            motivation_label,
        })
    }
}
