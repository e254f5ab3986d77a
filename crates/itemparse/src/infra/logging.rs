//! Tracing subscriber setup.
//!
//! Filtering comes from `ITEMPARSE_LOG`, then `RUST_LOG`, defaulting to `warn`. Output goes to
//! stderr so rendered items on stdout stay machine readable.

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ITEMPARSE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
