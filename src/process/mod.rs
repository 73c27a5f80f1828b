// src/process/mod.rs

//! Process orchestration.
//!
//! - [`orchestrator`] owns the child, starts the monitors, waits for exit
//!   and collects the drained buffers.
//! - [`outcome`] turns the harvested output into a checked or quiet result.

pub mod orchestrator;
pub mod outcome;

pub use orchestrator::{Interrupter, VerboseProcess};
pub use outcome::{Captured, Outcome, ProcessOutput};
