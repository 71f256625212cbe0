//! Logging for Herald
//!
//! Installs a `tracing-subscriber` registry that prints one line per event,
//! as text or JSON

use herald_config::{LogFormat, TelemetryConfig};
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber from configuration
///
/// An unparsable filter directive falls back to `info` with a warning
/// instead of refusing to start.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let (filter, rejected) = build_filter(&config.log_filter);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry.with(fmt_layer).try_init(),
        LogFormat::Json => registry.with(fmt_layer.json()).try_init(),
    }
    .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    if let Some(directive) = rejected {
        tracing::warn!(%directive, "invalid log filter, using 'info'");
    }

    Ok(())
}

/// Parse a filter directive, returning the rejected directive on failure
fn build_filter(directive: &str) -> (EnvFilter, Option<String>) {
    EnvFilter::try_new(directive).map_or_else(
        |_| (EnvFilter::new("info"), Some(directive.to_owned())),
        |filter| (filter, None),
    )
}
