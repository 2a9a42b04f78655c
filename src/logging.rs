//! Diagnostic logging using **tracing**.
//!
//! Events go to stderr so stdout stays reserved for the report. `RUST_LOG`
//! takes precedence over the level picked from `--verbose`.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("keyscan=debug")
    } else {
        EnvFilter::new("keyscan=warn")
    }
}

/// Initializes the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
