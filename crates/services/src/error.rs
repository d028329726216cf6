//! Shared error types for the services crate.

use thiserror::Error;

use gateway::GatewayError;

/// Errors emitted by `SessionReportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportServiceError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Errors emitted by `InsightsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InsightsError {
    #[error("insights are not configured")]
    Disabled,
    #[error("insights returned an empty response")]
    EmptyResponse,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
