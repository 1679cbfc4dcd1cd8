//! Runtime configuration: delays, limits and where recent searches live.

use crate::error::Result;
use crate::recent::{DEFAULT_CAPACITY, DEFAULT_STORAGE_KEY, DEFAULT_SUGGESTED};
use crate::search::MAX_RESULTS;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name used under the platform data dir.
const APP_DIR: &str = "blog-search";

/// Search feature settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Delay between the last keystroke and ranking.
    pub debounce_ms: u64,
    /// Delay between mount and reading the page, so late content can render.
    pub index_delay_ms: u64,
    pub max_results: usize,
    pub recent_capacity: usize,
    pub suggested_count: usize,
    /// Directory for the file-backed store; `None` means the platform data dir.
    pub storage_dir: Option<PathBuf>,
    pub storage_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            index_delay_ms: 500,
            max_results: MAX_RESULTS,
            recent_capacity: DEFAULT_CAPACITY,
            suggested_count: DEFAULT_SUGGESTED,
            storage_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl SearchConfig {
    /// Parses TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse search configuration")
    }

    /// Loads `path`, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Default config file location: `<config dir>/blog-search/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn index_delay(&self) -> Duration {
        Duration::from_millis(self.index_delay_ms)
    }

    /// Resolved storage directory, falling back to the platform data dir and then the working directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")))
        })
    }
}
