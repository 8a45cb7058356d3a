//! Configuration management for brdmill
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config
//! directory.
//!
//! Configuration is organized into two sections:
//! - Machine settings (velocities, pen heights) written into every job
//! - Job settings (board discovery, output file)

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the default configuration
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Machine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Tool travel velocity in mm/s
    pub travel_velocity: f64,
    /// Z-axis velocity in mm/s
    pub z_velocity: f64,
    /// Pen down z position
    pub pen_down_z: f64,
    /// Pen up z position
    pub pen_up_z: f64,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            travel_velocity: 5.0,
            z_velocity: 5.0,
            pen_down_z: 0.0,
            pen_up_z: 300.0,
        }
    }
}

/// Job settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSettings {
    /// Extension of the board file to discover, without the dot
    pub board_extension: String,
    /// File the compiled job is written to, relative to the board directory
    pub output_file: String,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            board_extension: "brd".to_string(),
            output_file: "millJob.mill".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Machine settings
    pub machine: MachineSettings,
    /// Job settings
    pub job: JobSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_for(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config location: `<config dir>/brdmill/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("platform config directory not found".to_string())
        })?;
        path.push("brdmill");
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_for(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_for(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
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
        // Rejects NaN and infinities as well as values <= 0
        let positive = |value: f64| value.is_finite() && value > 0.0;

        // Validate machine settings
        if !positive(self.machine.travel_velocity) {
            return Err(SettingsError::invalid(
                "machine.travel_velocity",
                "must be > 0",
            ));
        }

        if !positive(self.machine.z_velocity) {
            return Err(SettingsError::invalid("machine.z_velocity", "must be > 0"));
        }

        if !positive(self.machine.pen_up_z - self.machine.pen_down_z) {
            return Err(SettingsError::invalid(
                "machine.pen_up_z",
                format!("must be above pen_down_z ({})", self.machine.pen_down_z),
            ));
        }

        // Validate job settings
        if self.job.board_extension.trim().is_empty() {
            return Err(SettingsError::invalid("job.board_extension", "must not be empty"));
        }

        if self.job.output_file.trim().is_empty() {
            return Err(SettingsError::invalid("job.output_file", "must not be empty"));
        }

        Ok(())
    }

    /// Board extension without a leading dot
    pub fn board_extension(&self) -> &str {
        self.job.board_extension.trim_start_matches('.')
    }
}
