//! Configuration file loading.

use crate::error::ConfigError;
use crate::types::TagsConfig;
use std::path::Path;

/// Loads and parses an `aion-tags.toml` configuration from a project directory.
///
/// Reads `<project_dir>/aion-tags.toml`. A missing file is not an error: it
/// is treated the same as an empty configuration (every default kind stays
/// enabled, qualified tags stay off), since `aion tags` is meant to work
/// with zero setup against a bare directory of source files.
pub fn load_config(project_dir: &Path) -> Result<TagsConfig, ConfigError> {
    let config_path = project_dir.join("aion-tags.toml");
    match std::fs::read_to_string(&config_path) {
        Ok(content) => load_config_from_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TagsConfig::default()),
        Err(e) => Err(e.into()),
    }
}

/// Parses an `aion-tags.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<TagsConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}
