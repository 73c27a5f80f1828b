// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{
    DEFAULT_DRAIN_GRACE, DEFAULT_STDERR_CAPACITY, DEFAULT_STDOUT_CAPACITY, ProcessConfig,
    RawProcessConfig,
};
use crate::errors::{ProcessError, Result};
use crate::types::Severity;

impl TryFrom<RawProcessConfig> for ProcessConfig {
    type Error = ProcessError;

    fn try_from(raw: RawProcessConfig) -> std::result::Result<Self, Self::Error> {
        let drain_grace = resolve_drain_grace(&raw)?;

        Ok(ProcessConfig {
            stdout_capacity: raw.stdout.capacity.unwrap_or(DEFAULT_STDOUT_CAPACITY),
            stderr_capacity: raw.stderr.capacity.unwrap_or(DEFAULT_STDERR_CAPACITY),
            stdout_level: raw.stdout.level.unwrap_or(Severity::Info),
            stderr_level: raw.stderr.level.unwrap_or(Severity::Warn),
            drain_grace,
        })
    }
}

fn resolve_drain_grace(cfg: &RawProcessConfig) -> Result<Duration> {
    match cfg.drain.grace_ms {
        None => Ok(DEFAULT_DRAIN_GRACE),
        Some(0) => Err(ProcessError::ConfigError(
            "[drain].grace_ms must be >= 1 (got 0)".to_string(),
        )),
        Some(ms) => Ok(Duration::from_millis(ms)),
    }
}
