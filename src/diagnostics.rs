//! Internal diagnostics of the crate itself
//!
//! Fallbacks, registration decisions and sink failures are reported through
//! `tracing`. Applications that already install a subscriber get them for
//! free; others can call [`init_diagnostics`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor an explicit default is given
pub const DEFAULT_FILTER: &str = "logwarden=warn";

/// Build the filter: `RUST_LOG` first, `default_filter` otherwise
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}

/// Install a stderr subscriber for the crate's diagnostics
///
/// Returns false if a global subscriber is already set.
pub fn init_diagnostics(default_filter: Option<&str>) -> bool {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter(default_filter.unwrap_or(DEFAULT_FILTER)))
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
