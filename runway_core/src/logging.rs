//! Tracing setup shared by the runway binaries and tests.
//!
//! The engine itself only emits `tracing` events (optimizer iterations at
//! `debug`, convergence at `info`, suspicious crane data at `warn`). Nothing
//! is printed unless a subscriber is installed with one of these helpers.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging at INFO, overridable with `RUST_LOG`.
pub fn init() {
    init_with_level("info")
}

/// Initialize logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (trace, debug, info, warn, error)
///
/// `RUST_LOG` still wins when set. Events go to stderr so a JSON report on
/// stdout stays machine-readable. Calling this twice is a no-op.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

/// Initialize logging for tests (captured per test by the harness)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
