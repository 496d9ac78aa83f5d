//! # Configuration Loader / 配置加载器
//!
//! Reads `config.toml` and maps it to [`AppConfig`]. Validation is left to the caller.
//! 读取 `config.toml` 并映射为 [`AppConfig`]，校验由调用方负责。

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use cs_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// A missing file yields [`AppConfig::default`]; missing keys take their defaults.
///
/// # Errors / 错误
///
/// - File exists but cannot be read (I/O error)
/// - Content is not valid TOML, or a value has the wrong type
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %config_path.display(), "config file not found, using defaults");
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            });
        }
    };
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}
