//! Application configuration.
//!
//! Read from a YAML file, by default `<config dir>/pocket-money/config.yaml`.
//! A missing file yields the defaults. `POCKET_MONEY_CONFIG` points at a
//! different file and `POCKET_MONEY_DATA_DIR` overrides the data directory.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "POCKET_MONEY_CONFIG";
pub const DATA_DIR_ENV: &str = "POCKET_MONEY_DATA_DIR";

const APP_DIR_NAME: &str = "pocket-money";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the data file
    pub data_directory: PathBuf,
    pub data_file_name: String,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME),
            data_file_name: "data.json".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the environment-selected or default location
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);
        let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::load_with(&config_path, data_dir)
    }

    /// Load from `config_path`, then apply an optional data directory override
    pub fn load_with(config_path: &Path, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::from_file(config_path)?;
        if let Some(dir) = data_dir_override {
            debug!("Data directory overridden to {:?}", dir);
            config.data_directory = dir;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join("config.yaml")
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.data_directory.join(&self.data_file_name)
    }
}
