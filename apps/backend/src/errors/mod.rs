//! Error handling for the Tichu backend.

pub mod domain;
pub mod error_code;

pub use domain::{DomainError, RuleKind};
pub use error_code::ErrorKind;
