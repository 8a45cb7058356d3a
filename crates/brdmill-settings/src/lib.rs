//! brdmill Settings Crate
//!
//! Handles machine and job configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, JobSettings, MachineSettings, CONFIG_FILE_NAME};
pub use error::{SettingsError, SettingsResult};
