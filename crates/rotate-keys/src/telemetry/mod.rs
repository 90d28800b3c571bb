//! Telemetry initialisation for the rotation job.
//!
//! The job uses a lightweight setup: structured JSON logs on stdout, which is
//! all a short-lived scheduled run needs.
//!
//! # Telemetry invariants
//!
//! - **No key material** must ever appear in a log field; only key ids and
//!   user names are logged.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`).

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber for the rotation job.
///
/// Outputs structured JSON logs to stdout at the configured log level.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise rotate-keys tracing subscriber: {e}"))
}
