//! Diagnostic logging.
//!
//! Logs go to stderr so they never mix with the report on stdout. The filter
//! is read from `INTL_EXTRACT_LOG` (same syntax as `RUST_LOG`).

use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV_VAR: &str = "INTL_EXTRACT_LOG";

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        "warn,intl_extract=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
