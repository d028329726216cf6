use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use aptly_core::model::{AttemptMetric, QuestionId, SessionId, SessionSummary};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::normalize;
use crate::rows::{AttemptMetricRow, SessionSummaryRow};

/// HTTP client for the hosted backend: table reads plus the serverless
/// functions the platform exposes next to them.
///
/// The backend owns authentication, row-level security, and all business
/// rules; this client only shuttles rows and opaque JSON. An unconfigured
/// client is a valid state and fails calls with
/// [`GatewayError::MissingConfig`].
#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    config: Option<GatewayConfig>,
}

impl GatewayClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GatewayConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GatewayConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> Result<&GatewayConfig, GatewayError> {
        self.config.as_ref().ok_or(GatewayError::MissingConfig)
    }

    /// Fetches and normalizes the per-question metric rows for a session,
    /// in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the client is unconfigured, the request
    /// fails, or the response body does not decode.
    pub async fn list_attempt_metrics(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<AttemptMetric>, GatewayError> {
        let rows: Vec<AttemptMetricRow> = self
            .select("attempt_metrics", session_id, "*,question:questions(*)")
            .await?;
        Ok(normalize::attempt_metrics(&rows))
    }

    /// Fetches the precomputed summary for a session, if the backend stored
    /// one and it is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the client is unconfigured, the request
    /// fails, or the response body does not decode.
    pub async fn get_session_summary(
        &self,
        session_id: SessionId,
    ) -> Result<Option<SessionSummary>, GatewayError> {
        let rows: Vec<SessionSummaryRow> =
            self.select("session_summaries", session_id, "*").await?;
        Ok(rows.first().and_then(normalize::session_summary))
    }

    /// Invokes a serverless function with an opaque JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the client is unconfigured, the request
    /// fails, or the response body does not decode.
    pub async fn invoke_function(
        &self,
        name: &str,
        payload: Value,
    ) -> Result<Value, GatewayError> {
        let config = self.config()?;
        let url = config.endpoint(&format!("functions/v1/{name}"))?;
        debug!(function = name, "invoking serverless function");

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Asks the adaptive engine for the next question of a session.
    ///
    /// The decision algorithm is a remote black box; the response is passed
    /// through as opaque JSON for the practice interface to render.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the client is unconfigured, the request
    /// fails, or the response body does not decode.
    pub async fn next_question(
        &self,
        session_id: SessionId,
        payload: Value,
    ) -> Result<Value, GatewayError> {
        let config = self.config()?;
        let url = config.endpoint("api/adaptive")?;
        let body = FunctionCall {
            function_name: "next-question",
            payload,
            session_id: Some(session_id),
        };
        debug!(%session_id, "requesting next adaptive question");

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Files a learner-submitted problem report against a question.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the client is unconfigured or the request
    /// fails.
    pub async fn report_question(
        &self,
        question_id: QuestionId,
        error_type: &str,
        description: &str,
    ) -> Result<(), GatewayError> {
        let config = self.config()?;
        let url = config.endpoint("api/questions/report")?;
        let body = QuestionReport {
            question_id,
            error_type,
            description,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(GatewayError::HttpStatus(response.status()));
        }
        Ok(())
    }

    /// Reads rows from a table, filtered to one session.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        session_id: SessionId,
        columns: &str,
    ) -> Result<Vec<T>, GatewayError> {
        let config = self.config()?;
        let url = config.endpoint(&format!("rest/v1/{table}"))?;
        let filter = format!("eq.{session_id}");
        debug!(table, %session_id, "gateway select");

        let response = self
            .client
            .get(url)
            .query(&[("select", columns), ("session_id", filter.as_str())])
            .bearer_auth(&config.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Checks the status, then decodes the body through `serde_json` so a
    /// structurally invalid response fails fast with a descriptive error.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        if !response.status().is_success() {
            return Err(GatewayError::HttpStatus(response.status()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionCall<'a> {
    function_name: &'a str,
    payload: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_id: Option<SessionId>,
}

#[derive(Debug, Serialize)]
struct QuestionReport<'a> {
    question_id: QuestionId,
    error_type: &'a str,
    description: &'a str,
}
