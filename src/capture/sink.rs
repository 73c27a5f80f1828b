// src/capture/sink.rs

//! Where drained lines are mirrored to.
//!
//! The orchestrator holds an `Arc<dyn LineSink>` and hands a clone to each
//! monitor. Production code uses [`ConsoleSink`]; tests can provide their
//! own implementation that records lines instead of logging them.

use tracing::{debug, error, info, trace, warn};

use crate::types::{Severity, StreamKind};

/// `tracing` target used for mirrored child output.
///
/// Kept apart from the crate's diagnostic targets so a subscriber can route
/// or filter it on its own (e.g. `RUST_LOG=console=info,procdrain=warn`).
pub const CONSOLE_TARGET: &str = "console";

/// Receives every line a monitor drains, before it is buffered.
pub trait LineSink: Send + Sync {
    fn line(&self, stream: StreamKind, level: Severity, line: &str);
}

/// Default sink: emits each line as a `tracing` event under
/// [`CONSOLE_TARGET`] at the line's severity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LineSink for ConsoleSink {
    fn line(&self, stream: StreamKind, level: Severity, line: &str) {
        // `tracing` levels are part of static callsite metadata, hence the match.
        match level {
            Severity::Error => error!(target: CONSOLE_TARGET, stream = %stream, "{}", line),
            Severity::Warn => warn!(target: CONSOLE_TARGET, stream = %stream, "{}", line),
            Severity::Info => info!(target: CONSOLE_TARGET, stream = %stream, "{}", line),
            Severity::Debug => debug!(target: CONSOLE_TARGET, stream = %stream, "{}", line),
            Severity::Trace => trace!(target: CONSOLE_TARGET, stream = %stream, "{}", line),
        }
    }
}
