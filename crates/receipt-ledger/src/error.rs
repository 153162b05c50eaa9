use crate::config::ConfigError;
use crate::receipts::ValidationError;
use crate::telemetry::TelemetryError;

/// Process-level error for the CLI and server entry points.
///
/// Request-scoped failures (validation, unknown id) are matched directly in
/// the route handlers and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("malformed receipt document: {0}")]
    Document(#[from] serde_json::Error),
    #[error("invalid receipt: {0}")]
    Receipt(#[from] ValidationError),
}
