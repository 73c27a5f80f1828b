#![allow(dead_code)]

use std::time::Duration;

use procdrain::{ProcessConfig, Severity};
use tokio::process::Command;

/// `sh -c <script>`.
pub fn sh(script: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

/// Builder for `ProcessConfig` to simplify test setup.
pub struct ProcessConfigBuilder {
    config: ProcessConfig,
}

impl ProcessConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ProcessConfig::default(),
        }
    }

    pub fn stdout_capacity(mut self, capacity: usize) -> Self {
        self.config.stdout_capacity = capacity;
        self
    }

    pub fn stderr_capacity(mut self, capacity: usize) -> Self {
        self.config.stderr_capacity = capacity;
        self
    }

    pub fn unbounded(self) -> Self {
        self.stdout_capacity(0).stderr_capacity(0)
    }

    pub fn stdout_level(mut self, level: Severity) -> Self {
        self.config.stdout_level = level;
        self
    }

    pub fn stderr_level(mut self, level: Severity) -> Self {
        self.config.stderr_level = level;
        self
    }

    pub fn drain_grace_ms(mut self, ms: u64) -> Self {
        self.config.drain_grace = Duration::from_millis(ms);
        self
    }

    pub fn build(self) -> ProcessConfig {
        self.config
    }
}

impl Default for ProcessConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
