use thiserror::Error;

/// Errors surfaced by the remote data gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("gateway is not configured")]
    MissingConfig,

    #[error("invalid gateway endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("gateway request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed gateway response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("connection error: {0}")]
    Connection(String),
}
