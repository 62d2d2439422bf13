//! Diagnostic logging for the binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the application. [`init_logging`] installs a `fmt` layer on stderr so
//! the human-facing summary on stdout stays clean.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{ChatstatsError, Result};

/// Level used when neither a flag nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Builds the event filter.
///
/// An explicit `level` (a level name or any `EnvFilter` directive) wins,
/// then `RUST_LOG`, then [`DEFAULT_LOG_LEVEL`].
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| ChatstatsError::configuration("log_level", e.to_string())),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))),
    }
}

/// Installs the global subscriber.
///
/// Fails if `level` is not a valid filter directive or a subscriber is
/// already installed.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = build_filter(level)?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
        .map_err(|e| ChatstatsError::configuration("log_level", e.to_string()))?;

    tracing::debug!("logging initialized");
    Ok(())
}
