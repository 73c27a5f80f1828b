// src/process/outcome.rs

use std::time::Duration;

use crate::errors::{ProcessError, Result};

/// Text retained from the child's stdout and stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

/// Everything harvested from one finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub captured: Captured,
    /// Exit code, or `-1` when the process was terminated by a signal.
    pub exit_code: i32,
    /// Wall-clock time from the start of the harvest until the output was
    /// assembled.
    pub elapsed: Duration,
    /// `false` when the drain grace elapsed before both monitors finished;
    /// an unfinished stream's capture then holds the lines drained so far.
    pub drained: bool,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn outcome(self) -> Outcome {
        if self.exit_code == 0 {
            Outcome::Success(self.captured)
        } else {
            Outcome::NonZeroExit {
                code: self.exit_code,
                captured: self.captured,
            }
        }
    }
}

/// Exit-code based outcome, for callers that prefer matching over `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Captured),
    NonZeroExit { code: i32, captured: Captured },
}

impl Outcome {
    /// Captured text regardless of the exit code.
    pub fn captured(&self) -> &Captured {
        match self {
            Outcome::Success(captured) | Outcome::NonZeroExit { captured, .. } => captured,
        }
    }

    /// `Ok` on success, [`ProcessError::NonZeroExit`] otherwise.
    pub fn into_result(self) -> Result<Captured> {
        match self {
            Outcome::Success(captured) => Ok(captured),
            Outcome::NonZeroExit { code, captured } => Err(ProcessError::NonZeroExit {
                code,
                stdout: captured.stdout,
                stderr: captured.stderr,
            }),
        }
    }
}
