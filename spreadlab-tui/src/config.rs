//! TUI configuration — TOML file with backend URL and simulation context.
//!
//! Missing or corrupt files fall back to defaults so the UI always starts.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use spreadlab_core::BacktestClient;

/// User configuration persisted across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend_url: String,
    /// Treasury address the whole session simulates against.
    pub address: String,
    /// Simulation start date.
    pub start_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: BacktestClient::DEFAULT_BASE_URL.to_string(),
            address: "0x1a9c8182c09f50c8318d769245bec52c32be35bc".to_string(),
            start_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        }
    }
}

/// Default config location: `<config dir>/spreadlab/config.toml`.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spreadlab")
        .join("config.toml")
}

/// Load config from disk. Returns defaults if the file is missing or corrupt.
pub fn load(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

/// Save config to disk. Creates parent directories if needed.
pub fn save(path: &Path, config: &Config) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(config)?;
    std::fs::write(path, toml)?;
    Ok(())
}
