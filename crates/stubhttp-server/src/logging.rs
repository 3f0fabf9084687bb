//! Structured logging for tests that want to see server traffic.
//!
//! Filter with `RUST_LOG`, e.g. `RUST_LOG=stubhttp_core=debug` to log every
//! matched and unmatched request.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "stubhttp_server=info,stubhttp_core=info";

/// Install a global subscriber writing through the test harness.
///
/// Safe to call from every test: only the first call installs anything.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
