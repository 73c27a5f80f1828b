// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{ProcessConfig, RawProcessConfig};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawProcessConfig`.
///
/// This only performs TOML deserialization; defaults are not resolved and
/// values are not checked. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProcessConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawProcessConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Load a configuration file from path, validate it and resolve defaults.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProcessConfig> {
    let raw_config = load_from_path(&path)?;
    ProcessConfig::try_from(raw_config)
}

/// Parse and validate a configuration held in memory.
pub fn parse_str(contents: &str) -> Result<ProcessConfig> {
    let raw_config: RawProcessConfig = toml::from_str(contents)?;
    ProcessConfig::try_from(raw_config)
}
