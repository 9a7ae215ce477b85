//! Test logging initialization shared by unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a tracing subscriber for tests.
///
/// Idempotent and safe to call from every test. The filter is read from
/// `TEST_LOG`, then `RUST_LOG`, and defaults to `warn` so rule rejections
/// logged by the engine stay out of normal test output.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}

/// Log a test's starting point at `info`, visible with `TEST_LOG=info`.
pub fn scenario(name: &str) {
    init();
    tracing::info!(scenario = name, "test scenario");
}
