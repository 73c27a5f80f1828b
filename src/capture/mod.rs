// src/capture/mod.rs

//! Output capture layer.
//!
//! - [`buffer`] holds the bounded trailing text buffer each monitor fills.
//! - [`monitor`] spawns the per-stream drain tasks.
//! - [`barrier`] is the completion barrier monitors arrive at once their
//!   stream has ended.
//! - [`sink`] defines where drained lines are mirrored to.

pub mod barrier;
pub mod buffer;
pub mod monitor;
pub mod sink;

pub use barrier::{CompletionBarrier, CompletionSignal};
pub use buffer::{SharedBuffer, TrailingBuffer};
pub use monitor::{MonitorSpec, spawn_monitor};
pub use sink::{CONSOLE_TARGET, ConsoleSink, LineSink};
