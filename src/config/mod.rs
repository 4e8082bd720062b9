//! Configuration management module
//!
//! Handles loading, saving, and validation of user preferences: the time
//! limit new questions start with, countdown and redraw rates, and the log
//! level.

use crate::{QcmError, Result, APP_NAME, CONFIG_FILE, MAX_TIME_LIMIT_SECS, MIN_TIME_LIMIT_SECS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User preferences read from `qcm.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QcmConfig {
    /// Time limit a fresh draft question starts with (seconds)
    pub default_time_limit_secs: u32,
    /// Countdown period (milliseconds), one second in normal use
    pub tick_interval_ms: u64,
    /// How long the UI waits for input before redrawing (milliseconds)
    pub ui_tick_rate_ms: u64,
    /// Fallback log filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for QcmConfig {
    fn default() -> Self {
        Self {
            default_time_limit_secs: crate::DEFAULT_TIME_LIMIT_SECS,
            tick_interval_ms: 1000,
            ui_tick_rate_ms: 250,
            log_level: "info".to_string(),
        }
    }
}

impl QcmConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&self.default_time_limit_secs) {
            return Err(QcmError::Config(format!(
                "Default time limit must be between {} and {} seconds (got {})",
                MIN_TIME_LIMIT_SECS, MAX_TIME_LIMIT_SECS, self.default_time_limit_secs
            )));
        }

        const MIN_TICK_MS: u64 = 10;
        const MAX_TICK_MS: u64 = 10_000;
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&self.tick_interval_ms) {
            return Err(QcmError::Config(format!(
                "Tick interval must be between {}ms and {}ms (got {}ms)",
                MIN_TICK_MS, MAX_TICK_MS, self.tick_interval_ms
            )));
        }

        const MIN_UI_MS: u64 = 10;
        const MAX_UI_MS: u64 = 1000;
        if !(MIN_UI_MS..=MAX_UI_MS).contains(&self.ui_tick_rate_ms) {
            return Err(QcmError::Config(format!(
                "UI tick rate must be between {}ms and {}ms (got {}ms)",
                MIN_UI_MS, MAX_UI_MS, self.ui_tick_rate_ms
            )));
        }

        if self.log_level.trim().is_empty() {
            return Err(QcmError::Config("Log level must not be empty".to_string()));
        }

        Ok(())
    }

    /// Set the time limit new draft questions start with
    pub fn with_default_time_limit(mut self, secs: u32) -> Self {
        self.default_time_limit_secs = secs;
        self
    }

    /// Set the countdown period
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Set the UI redraw rate
    pub fn with_ui_tick_rate(mut self, rate: Duration) -> Self {
        self.ui_tick_rate_ms = rate.as_millis() as u64;
        self
    }

    /// Set the fallback log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn ui_tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui_tick_rate_ms)
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            QcmError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            QcmError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QcmError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            QcmError::Config(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/qcm/qcm.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            QcmError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
