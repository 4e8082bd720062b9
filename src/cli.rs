//! Command line arguments

use crate::{config::QcmConfig, Result};
use clap::Parser;
use std::path::PathBuf;

/// Build multiple-choice quizzes and play them against the clock
#[derive(Parser, Debug)]
#[command(name = "qcm", version, about, long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Time limit new questions start with, in seconds
    #[arg(short, long, value_name = "SECS")]
    pub time_limit: Option<u32>,

    /// Directory the log file is written to
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Load the configuration this invocation asks for, with overrides applied
    pub fn load_config(&self) -> Result<QcmConfig> {
        let config = match &self.config {
            Some(path) => QcmConfig::load_from(path)?,
            None => QcmConfig::load()?,
        };
        let config = self.apply_overrides(config);
        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides on top of `config`
    pub fn apply_overrides(&self, config: QcmConfig) -> QcmConfig {
        match self.time_limit {
            Some(secs) => config.with_default_time_limit(secs),
            None => config,
        }
    }
}
