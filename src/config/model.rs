// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::Severity;

/// Characters of stdout retained by default.
pub const DEFAULT_STDOUT_CAPACITY: usize = 1024;

/// Characters of stderr retained by default (0 = unbounded).
pub const DEFAULT_STDERR_CAPACITY: usize = 0;

/// How long to wait for the monitors after the process has exited.
pub const DEFAULT_DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Configuration as read from a TOML file, before defaults are resolved.
///
/// ```toml
/// [stdout]
/// capacity = 1024
/// level = "info"
///
/// [stderr]
/// capacity = 0
/// level = "warn"
///
/// [drain]
/// grace_ms = 2000
/// ```
///
/// All sections and fields are optional. Stream defaults differ between
/// stdout and stderr, so they stay `None` here and are filled in when the
/// raw config is converted into a [`ProcessConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProcessConfig {
    #[serde(default)]
    pub stdout: StreamSection,

    #[serde(default)]
    pub stderr: StreamSection,

    #[serde(default)]
    pub drain: DrainSection,
}

/// `[stdout]` / `[stderr]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSection {
    /// Retain only the last `capacity` characters; 0 keeps everything.
    #[serde(default)]
    pub capacity: Option<usize>,

    /// Severity each line of this stream is logged at.
    #[serde(default)]
    pub level: Option<Severity>,
}

/// `[drain]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrainSection {
    /// Grace period after process exit, in milliseconds.
    #[serde(default)]
    pub grace_ms: Option<u64>,
}

/// Validated, fully resolved configuration used by
/// [`VerboseProcess`](crate::process::VerboseProcess).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    pub stdout_capacity: usize,
    pub stderr_capacity: usize,
    pub stdout_level: Severity,
    pub stderr_level: Severity,
    pub drain_grace: Duration,
}

impl ProcessConfig {
    /// Set the retained stdout capacity in characters.
    pub fn with_stdout_capacity(mut self, capacity: usize) -> Self {
        self.stdout_capacity = capacity;
        self
    }

    /// Set the retained stderr capacity in characters.
    pub fn with_stderr_capacity(mut self, capacity: usize) -> Self {
        self.stderr_capacity = capacity;
        self
    }

    /// Set the severities stdout and stderr lines are logged at.
    pub fn with_levels(mut self, stdout: Severity, stderr: Severity) -> Self {
        self.stdout_level = stdout;
        self.stderr_level = stderr;
        self
    }

    pub fn with_drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            stdout_capacity: DEFAULT_STDOUT_CAPACITY,
            stderr_capacity: DEFAULT_STDERR_CAPACITY,
            stdout_level: Severity::Info,
            stderr_level: Severity::Warn,
            drain_grace: DEFAULT_DRAIN_GRACE,
        }
    }
}
