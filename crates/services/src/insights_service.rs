use serde_json::{Value, json};

use aptly_core::model::SessionId;
use gateway::GatewayClient;

use crate::error::InsightsError;

/// Client for the `ai-insights` edge function.
///
/// Insight generation is an opaque remote call; this service only owns the
/// enabled/disabled decision and response unwrapping.
#[derive(Clone)]
pub struct InsightsService {
    gateway: GatewayClient,
}

impl InsightsService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GatewayClient::from_env())
    }

    #[must_use]
    pub fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.gateway.enabled()
    }

    /// Requests AI-generated insight copy for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `InsightsError::Disabled` when the gateway is unconfigured,
    /// `InsightsError::EmptyResponse` when the function returns no usable
    /// text, or `InsightsError::Gateway` for transport failures.
    pub async fn session_insights(
        &self,
        session_id: SessionId,
    ) -> Result<String, InsightsError> {
        if !self.gateway.enabled() {
            return Err(InsightsError::Disabled);
        }

        let response = self
            .gateway
            .invoke_function("ai-insights", json!({ "session_id": session_id }))
            .await?;

        let insight = response
            .get("insight")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(InsightsError::EmptyResponse)?;

        Ok(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn disabled_service_fails_before_any_request() {
        let service = InsightsService::new(GatewayClient::new(None));
        assert!(!service.enabled());

        let err = service
            .session_insights(SessionId::new(Uuid::from_u128(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, InsightsError::Disabled));
    }
}
