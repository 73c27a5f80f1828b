// src/lib.rs

//! Run an external process, log its output line by line while it runs, and
//! return the trailing part of its stdout and stderr once it exits.

pub mod capture;
pub mod config;
pub mod errors;
pub mod logging;
pub mod process;
pub mod types;

pub use config::ProcessConfig;
pub use errors::{ProcessError, Result};
pub use process::{Captured, Interrupter, Outcome, ProcessOutput, VerboseProcess};
pub use types::{Severity, StreamKind};
