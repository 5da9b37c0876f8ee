use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_LOAD_LIMIT: usize = 500;

/// Lower bound for the poll interval; anything faster only burns CPU.
const MIN_POLL_INTERVAL_MS: u64 = 50;

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub clipboard: ClipboardConfig,
    pub search: SearchConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path; `None` means the application data directory.
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many items `load()` reads from the store.
    pub load_limit: usize,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            load_limit: DEFAULT_LOAD_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.clipboard.poll_interval_ms.max(MIN_POLL_INTERVAL_MS))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search.debounce_ms)
    }

    /// A zero load limit is treated as the default.
    pub fn load_limit(&self) -> usize {
        match self.history.load_limit {
            0 => DEFAULT_LOAD_LIMIT,
            n => n,
        }
    }
}
