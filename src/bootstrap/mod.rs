//! Process bootstrap: tracing, configuration, dependency wiring and commands.

pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{history_dir, load_app_config, resolve_app_dirs};
pub use run::{clear_history, list_history, run_watcher};
pub use tracing::init_tracing_subscriber;
pub use wiring::{wire_dependencies, AppRuntime, WiringError};
