//! Tracing initialization for the go-perf binary.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-target log directives.
pub const LOG_ENV: &str = "GO_PERF_LOG";

/// Initialize logging to stderr.
///
/// Reads `GO_PERF_LOG` (e.g. `GO_PERF_LOG=go_perf=debug`) and falls back
/// to `go_perf=<default_level>` if it is unset or invalid.
///
/// This function is idempotent; only the first call installs a subscriber.
pub fn init_tracing(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(format!("go_perf={}", default_level)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(filter)
            .init();
    });
}
