//! Domain-level error type used by the rules engine.
//!
//! This error type is transport-agnostic. The session boundary converts it
//! into `crate::error::AppError` and finally into an `error` event for the
//! offending player.

use thiserror::Error;

use super::error_code::ErrorKind;

/// Categories of rule violations (well-formed input that breaks a game rule).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleKind {
    PhaseMismatch,
    OutOfTurn,
    CardNotInHand,
    InvalidCombination,
    DoesNotBeatTable,
    MustPlayRequestedCard,
    InvalidBet,
    InvalidTrade,
    AlreadyDone,
    InvalidTarget,
    NotJoined,
    GameInProgress,
    SessionFull,
    /// Unknown card key, suit or card name.
    InvalidCard,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Game rule violation; recoverable, state is left unchanged.
    #[error("{1}")]
    Business(RuleKind, String),
    /// Invariant violation inside the core. Indicates a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn business(kind: RuleKind, detail: impl Into<String>) -> Self {
        Self::Business(kind, detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Rule category for business errors, `None` for internal ones.
    pub fn rule(&self) -> Option<&RuleKind> {
        match self {
            DomainError::Business(kind, _) => Some(kind),
            DomainError::Internal(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Business(..) => ErrorKind::BusinessError,
            DomainError::Internal(_) => ErrorKind::InternalError,
        }
    }
}
