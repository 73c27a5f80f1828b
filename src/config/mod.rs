// src/config/mod.rs

//! Configuration for a verbose process run.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk or a string (`loader.rs`).
//! - Validate and resolve per-stream defaults (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{
    DEFAULT_DRAIN_GRACE, DEFAULT_STDERR_CAPACITY, DEFAULT_STDOUT_CAPACITY, DrainSection,
    ProcessConfig, RawProcessConfig, StreamSection,
};
