//! Job configuration for platenest
//!
//! Provides configuration file handling, defaults and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Toolpath settings (feed rate, units, spindle power)
//! - Nesting settings (remnant extension)
//! - Output settings (default program path, debug preview)
//! - Extraction settings (document row marker, line merge tolerance)

use crate::error::{ConfigError, SettingsError, SettingsResult};
pub use platenest_core::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Toolpath emission settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathSettings {
    /// Feed rate written to the program header
    pub feed_rate: f64,
    /// Unit the plate and part dimensions are given in
    pub units: MeasurementSystem,
    /// S word used when re-engaging for horizontal cuts
    pub spindle_power: u32,
}

impl Default for ToolpathSettings {
    fn default() -> Self {
        Self {
            feed_rate: 1000.0,
            units: MeasurementSystem::Metric,
            spindle_power: 1000,
        }
    }
}

/// Nesting settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestingSettings {
    /// Extend the last column's horizontal cuts to the plate edge
    pub extend_remnant: bool,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Program path used when none is given
    pub default_output: PathBuf,
    /// Write an SVG preview next to the program
    pub debug_preview: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_output: PathBuf::from("output.nc"),
            debug_preview: false,
        }
    }
}

/// Extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Word that starts every part row in a document's table
    pub row_marker: String,
    /// Pixel distance under which detected lines are merged
    pub merge_tolerance_px: i32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            row_marker: "절단".to_string(),
            merge_tolerance_px: 10,
        }
    }
}

/// Complete job configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub toolpath: ToolpathSettings,
    pub nesting: NestingSettings,
    pub output: OutputSettings,
    pub extraction: ExtractionSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/platenest/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        path.push("platenest");
        path.push("config.toml");
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load the default config file if it exists, defaults otherwise.
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.toolpath.feed_rate.is_finite() && self.toolpath.feed_rate > 0.0) {
            return Err(SettingsError::invalid("toolpath.feed_rate", "must be > 0"));
        }

        if self.toolpath.spindle_power == 0 {
            return Err(SettingsError::invalid("toolpath.spindle_power", "must be > 0"));
        }

        if self.output.default_output.as_os_str().is_empty() {
            return Err(SettingsError::invalid("output.default_output", "must not be empty"));
        }

        if self.extraction.row_marker.trim().is_empty() {
            return Err(SettingsError::invalid("extraction.row_marker", "must not be empty"));
        }

        if self.extraction.merge_tolerance_px < 0 {
            return Err(SettingsError::invalid(
                "extraction.merge_tolerance_px",
                "must be >= 0",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
