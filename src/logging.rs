// src/logging.rs

//! Logging setup for `procdrain` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. the `level` argument (if provided)
//! 2. `PROCDRAIN_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `info`
//!
//! Logs are sent to STDERR. Captured child output is emitted under the
//! [`CONSOLE_TARGET`](crate::capture::CONSOLE_TARGET) target, so it can be
//! filtered separately from the crate's own diagnostics.

use anyhow::{anyhow, Result};
use tracing_subscriber::fmt;

use crate::types::Severity;

/// Initialise global logging subscriber.
///
/// Fails if a global subscriber has already been installed.
pub fn init_logging(level: Option<Severity>) -> Result<()> {
    let level = match level {
        Some(severity) => tracing::Level::from(severity),
        None => std::env::var("PROCDRAIN_LOG")
            .ok()
            .and_then(|s| s.parse::<Severity>().ok())
            .map(tracing::Level::from)
            .unwrap_or(tracing::Level::INFO),
    };

    fmt()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
