//! # Configuration resolution / 配置解析
//!
//! Decides where ClipShelf keeps its files and loads `config.toml`.
//!
//! - application root: `--data-dir`, else the platform data dir (`clipshelf[-<profile>]`)
//! - config file: `--config`, else `<root>/config.toml`
//! - history store: `[storage] data_dir`, else `<root>/history`

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use cs_core::app_dirs::AppDirs;
use cs_core::config::AppConfig;
use cs_infra::load_config;
use cs_platform::DirsAppDirsAdapter;

pub fn resolve_app_dirs(data_dir_override: Option<&Path>) -> anyhow::Result<AppDirs> {
    match data_dir_override {
        Some(root) => Ok(AppDirs {
            app_data_root: root.to_path_buf(),
        }),
        None => Ok(DirsAppDirsAdapter::new().get_app_dirs()?),
    }
}

/// Load and validate the configuration.
pub fn load_app_config(app_dirs: &AppDirs, config_override: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config_path = config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| app_dirs.config_path());
    let config = load_config(&config_path)?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;
    info!(path = %config_path.display(), "configuration loaded");
    Ok(config)
}

pub fn history_dir(app_dirs: &AppDirs, config: &AppConfig) -> PathBuf {
    config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| app_dirs.history_dir())
}
