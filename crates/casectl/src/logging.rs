//! Logging bootstrap for casectl
//!
//! Logs go to stderr so stdout stays clean for schedules and `--json`.
//! Level comes from $CASECTL_LOG when set, otherwise `warn` (`debug` with -v).

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CASECTL_LOG";

pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
