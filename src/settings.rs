use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FinhubError, Result};
use crate::ledger::LEDGER_FILE;
use crate::reports::{DEFAULT_TOP_CATEGORIES, DEFAULT_TREND_MONTHS};

pub const DEFAULT_UPLOAD_ENDPOINT: &str = "http://localhost:3000/api/files/upload";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default = "default_upload_endpoint")]
    pub upload_endpoint: String,
    #[serde(default = "default_trend_months")]
    pub trend_months: usize,
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
}

fn default_upload_endpoint() -> String {
    DEFAULT_UPLOAD_ENDPOINT.to_string()
}

fn default_trend_months() -> usize {
    DEFAULT_TREND_MONTHS
}

fn default_top_categories() -> usize {
    DEFAULT_TOP_CATEGORIES
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            upload_endpoint: default_upload_endpoint(),
            trend_months: default_trend_months(),
            top_categories: default_top_categories(),
        }
    }
}

impl Settings {
    pub fn ledger_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join(LEDGER_FILE)
    }

    pub fn exports_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("exports")
    }
}

fn config_dir() -> PathBuf {
    // Tests and scripted runs point this somewhere disposable.
    if let Some(dir) = std::env::var_os("FINHUB_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("finhub")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("finhub")
}

pub fn load_settings() -> Settings {
    read_settings(&settings_path())
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    write_settings(&settings_path(), settings)
}

fn read_settings(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), "ignoring unreadable settings: {e}");
        Settings::default()
    })
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| FinhubError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
