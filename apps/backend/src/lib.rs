#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod ws;

// Re-exports for public API
pub use config::GameConfig;
pub use error::AppError;
pub use errors::{DomainError, ErrorKind, RuleKind};
pub use services::game_flow::{GameFlow, GameResult, GameState, GameStatus};
pub use ws::{ClientIntent, EventSink, GameSession, Outbox, ServerEvent, SessionRegistry};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
