use thiserror::Error;
use uuid::Uuid;

use crate::errors::{DomainError, ErrorKind};

/// Boundary-level error: everything that can go wrong between a raw client
/// payload and the rules engine.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Error kind reported to the client.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation { .. } => ErrorKind::ValidationError,
            AppError::Domain(err) => err.kind(),
            AppError::SessionNotFound(_) | AppError::Config { .. } => ErrorKind::InternalError,
        }
    }

    /// Message safe to show to a player. Internal failures are reported
    /// generically; their detail only goes to the logs.
    pub fn client_message(&self) -> String {
        match self.kind() {
            ErrorKind::InternalError => "Internal server error".to_string(),
            ErrorKind::BusinessError => format!("Business Error: {self}"),
            ErrorKind::ValidationError => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::validation(err.to_string())
    }
}
