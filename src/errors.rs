// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::StreamKind;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("cannot launch `{program}`: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },

    #[error("child process has no piped {stream}; spawn it with Stdio::piped()")]
    MissingPipe { stream: StreamKind },

    #[error("failed waiting for process exit: {source}")]
    Wait { source: std::io::Error },

    #[error("interrupted while waiting for process exit")]
    Interrupted,

    /// Only produced by checked retrieval. Carries both captures so the
    /// failure can be diagnosed without re-running the process.
    #[error("Non-zero exit code {code}: {stdout}")]
    NonZeroExit {
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ProcessError>;
