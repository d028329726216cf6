use std::env;

use tracing::warn;
use url::Url;

/// Environment variable holding the backend base URL.
pub const URL_VAR: &str = "APTLY_GATEWAY_URL";
/// Environment variable holding the backend API key.
pub const KEY_VAR: &str = "APTLY_GATEWAY_KEY";

/// Connection settings for the hosted backend.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: Url,
    pub api_key: String,
}

impl GatewayConfig {
    #[must_use]
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Builds a config from `APTLY_GATEWAY_URL` and `APTLY_GATEWAY_KEY`.
    ///
    /// Returns `None` when either variable is unset or blank, or when the URL
    /// does not parse. An unconfigured client is a supported state, not a
    /// startup failure.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(KEY_VAR).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let raw_url = env::var(URL_VAR).ok()?;
        let base_url = match Url::parse(raw_url.trim()) {
            Ok(url) => url,
            Err(err) => {
                warn!(%err, "ignoring unparseable {URL_VAR}");
                return None;
            }
        };
        Some(Self { base_url, api_key })
    }

    /// Resolves a path (e.g. `rest/v1/attempt_metrics`) against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        // A base without a trailing slash would swallow its last segment on
        // join.
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_relative_paths() {
        let config = GatewayConfig::new(Url::parse("https://api.example.test").unwrap(), "key");
        let url = config.endpoint("rest/v1/attempt_metrics").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.test/rest/v1/attempt_metrics"
        );
    }

    #[test]
    fn endpoint_preserves_a_base_path() {
        let config =
            GatewayConfig::new(Url::parse("https://api.example.test/tenant1").unwrap(), "key");
        let url = config.endpoint("functions/v1/ai-insights").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.test/tenant1/functions/v1/ai-insights"
        );
    }
}
