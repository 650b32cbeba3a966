//! Logging and tracing configuration
//!
//! Test binaries print their report on stdout and assertion diagnostics on
//! stderr, so runtime logs go to stderr and stay quiet unless asked for.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive for xtest logs
pub const LOG_ENV: &str = "XTEST_LOG";

/// Initialize tracing for a test binary (stderr logging)
///
/// The filter comes from `XTEST_LOG` when set, otherwise from `default_filter`
/// (normally the config file's `log.filter`). A subscriber installed earlier by
/// the host program is left in place.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::try_new(default_filter).unwrap_or_else(|e| {
            eprintln!("Warning: invalid log filter '{}': {}", default_filter, e);
            EnvFilter::new("xtest=warn")
        })
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }
}
