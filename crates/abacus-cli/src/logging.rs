//! Tracing subscriber setup
//!
//! Logs go to stderr so menu and eval output on stdout stays clean.

use crate::config::Verbosity;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Builds the log filter: `RUST_LOG` wins, otherwise the verbosity level
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()))
}

/// Installs the global subscriber.
///
/// A second call is a no-op, which keeps tests that share a process happy.
pub fn init_tracing(verbosity: Verbosity) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
