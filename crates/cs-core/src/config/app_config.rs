//! Application configuration domain model

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clipboard::Category;
use crate::config::history_config::{HistoryConfig, DEFAULT_MAX_ITEMS};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Type markers published by password managers and other apps that ask
/// clipboard managers not to record the copy (see nspasteboard.org).
pub const DEFAULT_IGNORED_TYPES: &[&str] = &[
    "org.nspasteboard.ConcealedType",
    "org.nspasteboard.TransientType",
    "org.nspasteboard.AutoGeneratedType",
    "x-kde-passwordManagerHint",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("history.max_items must be at least 1")]
    ZeroMaxItems,

    #[error("watcher.poll_interval_ms must be greater than 0")]
    ZeroPollInterval,

    #[error("unknown category in history.excluded_categories: {0}")]
    UnknownCategory(String),
}

/// Application configuration, as read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistorySection,
    pub watcher: WatcherSection,
    pub storage: StorageSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySection {
    /// Maximum number of clipboard history items to keep
    pub max_items: usize,
    /// Maximum total size of all stored representations, in MiB
    pub max_total_size_mb: u64,
    /// Category tags that are never recorded
    pub excluded_categories: Vec<String>,
    /// Type-identifiers whose presence suppresses capture
    pub ignored_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSection {
    pub poll_interval_ms: u64,
    /// How long the detector ignores clipboard changes after a restore
    pub restore_settle_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSection {
    /// Overrides the application-support directory
    pub data_dir: Option<PathBuf>,
}

impl Default for HistorySection {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_total_size_mb: 512,
            excluded_categories: Vec::new(),
            ignored_types: DEFAULT_IGNORED_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for WatcherSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            restore_settle_ms: 500,
        }
    }
}

impl AppConfig {
    /// Parse from an already-decoded TOML value. Missing keys take their defaults.
    pub fn from_toml(value: &toml::Value) -> anyhow::Result<Self> {
        let config: AppConfig = value.clone().try_into()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.max_items == 0 {
            return Err(ConfigError::ZeroMaxItems);
        }
        if self.watcher.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        self.excluded_categories()?;
        Ok(())
    }

    pub fn excluded_categories(&self) -> Result<BTreeSet<Category>, ConfigError> {
        self.history
            .excluded_categories
            .iter()
            .map(|tag| {
                tag.parse::<Category>()
                    .map_err(|_| ConfigError::UnknownCategory(tag.clone()))
            })
            .collect()
    }

    /// Runtime limits for the history engine.
    pub fn history_config(&self) -> Result<HistoryConfig, ConfigError> {
        Ok(HistoryConfig {
            max_items: self.history.max_items,
            max_total_size_bytes: self.history.max_total_size_mb.saturating_mul(BYTES_PER_MB),
            excluded_categories: self.excluded_categories()?,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.watcher.poll_interval_ms)
    }

    pub fn restore_settle_delay(&self) -> Duration {
        Duration::from_millis(self.watcher.restore_settle_ms)
    }
}
