//! Parsing of `aion-tags.toml` tag-extraction configuration files.
//!
//! This crate reads the small configuration file that tunes `aion tags`:
//! whether qualified-tag emission is on, and which tag kinds are enabled,
//! producing a strongly-typed [`TagsConfig`].

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{TagSettings, TagsConfig};
