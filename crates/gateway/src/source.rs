use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aptly_core::model::{AttemptMetric, SessionId, SessionSummary};

use crate::client::GatewayClient;
use crate::error::GatewayError;

/// Read contract for session analytics data.
///
/// Callers own retry and cancellation of the underlying fetch; these
/// operations are independent request/response reads with no ordering
/// contract between them.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Per-question metric rows for a session, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the backend is unreachable or rejects the
    /// request.
    async fn list_attempt_metrics(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttemptMetric>, GatewayError>;

    /// Precomputed summary for a session, when the backend stored a usable
    /// one.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the backend is unreachable or rejects the
    /// request.
    async fn get_session_summary(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionSummary>, GatewayError>;
}

#[async_trait]
impl MetricsSource for GatewayClient {
    async fn list_attempt_metrics(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttemptMetric>, GatewayError> {
        GatewayClient::list_attempt_metrics(self, session_id).await
    }

    async fn get_session_summary(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionSummary>, GatewayError> {
        GatewayClient::get_session_summary(self, session_id).await
    }
}

/// Simple in-memory source implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySource {
    metrics: Arc<Mutex<HashMap<SessionId, Vec<AttemptMetric>>>>,
    summaries: Arc<Mutex<HashMap<SessionId, SessionSummary>>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the metric rows for a session, replacing any existing ones.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if the store is poisoned.
    pub fn put_metrics(
        &self,
        session_id: SessionId,
        metrics: Vec<AttemptMetric>,
    ) -> Result<(), GatewayError> {
        let mut guard = self
            .metrics
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        guard.insert(session_id, metrics);
        Ok(())
    }

    /// Stores the summary for a session, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if the store is poisoned.
    pub fn put_summary(
        &self,
        session_id: SessionId,
        summary: SessionSummary,
    ) -> Result<(), GatewayError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        guard.insert(session_id, summary);
        Ok(())
    }
}

#[async_trait]
impl MetricsSource for InMemorySource {
    async fn list_attempt_metrics(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttemptMetric>, GatewayError> {
        let guard = self
            .metrics
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(guard.get(&session_id).cloned().unwrap_or_default())
    }

    async fn get_session_summary(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionSummary>, GatewayError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(guard.get(&session_id).cloned())
    }
}
