//! Configuration management for morphdb CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output directory used when neither the command line nor the config sets one
pub const DEFAULT_OUTPUT_DIR: &str = "morph_database";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the spell data dumps
    pub base_url: Option<String>,

    /// Default output directory
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("morphdb");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from the default location, or defaults if there is no file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, or defaults if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))
    }

    /// Base URL: command line / environment first, then config, then SimC
    pub fn resolve_base_url(&self, cli_value: Option<&str>) -> String {
        cli_value
            .or(self.base_url.as_deref())
            .unwrap_or(morphdb::SIMC_BASE_URL)
            .to_string()
    }

    /// Output directory: command line first, then config, then the default
    pub fn resolve_output_dir(&self, cli_value: Option<&Path>) -> PathBuf {
        cli_value
            .or(self.output_dir.as_deref())
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR))
            .to_path_buf()
    }
}
