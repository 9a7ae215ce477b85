//! Shared test support for the Tichu backend.
//!
//! Unit tests and integration tests install the same quiet tracing
//! subscriber through [`logging::init`].

pub mod logging;
