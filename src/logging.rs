//! Structured logging via the `tracing` ecosystem.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when the config doesn't name one.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the filter for `level`, unless `RUST_LOG` says otherwise.
pub fn env_filter(level: &str) -> EnvFilter {
    let level = if level.trim().is_empty() {
        DEFAULT_FILTER
    } else {
        level
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Installs the global subscriber. Call once, before anything logs.
///
/// Output goes to stderr, tagged with the module path and the time since
/// startup.
pub fn init_logging(level: &str) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .init();
}
