pub mod app_config;
pub mod history_config;

pub use app_config::{AppConfig, ConfigError, DEFAULT_IGNORED_TYPES};
pub use history_config::HistoryConfig;
