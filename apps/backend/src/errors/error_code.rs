//! Error kinds reported to clients.
//!
//! All kinds are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in `error` events.

use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Well-formed input that violates a game rule
    BusinessError,
    /// Malformed or ill-typed input rejected at the boundary
    ValidationError,
    /// Invariant violation inside the engine
    InternalError,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BusinessError => "BUSINESS_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
