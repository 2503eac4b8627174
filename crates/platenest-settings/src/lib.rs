//! platenest Settings Crate
//!
//! Handles job configuration: defaults, TOML/JSON persistence and validation.

pub mod config;
pub mod error;

pub use config::{Config, ExtractionSettings, NestingSettings, OutputSettings, ToolpathSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
