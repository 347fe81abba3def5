//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "PERFTEST_LOG";

static INIT: Once = Once::new();

/// Default filter directive for a `-v` count: 0 warns, 1 informs,
/// anything more is debug output.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Initialize the perftest tracing/logging system.
///
/// `PERFTEST_LOG` takes precedence, e.g. `PERFTEST_LOG=perftest_engine=debug`.
/// Falls back to the directive for `verbosity` if it is not set or invalid.
///
/// This function is idempotent; only the first call installs a subscriber.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
