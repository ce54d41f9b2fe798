use conduit_gateway::{ConfigError, TransportError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load gateway configuration")]
    Config(#[from] ConfigError),

    #[error("failed to set up HTTP transport")]
    Transport(#[from] TransportError),

    #[error("failed to render output")]
    Output(#[from] serde_json::Error),

    /// Workflow failure; the cause is logged, not shown.
    #[error("operation failed")]
    OperationFailed,
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Log the full cause chain of a failed workflow and hide it from the user.
pub(crate) fn operation_failed(
    operation: &'static str,
    err: &(dyn std::error::Error + 'static),
) -> CliError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    error!(operation, error = %message, "operation failed");
    CliError::OperationFailed
}
