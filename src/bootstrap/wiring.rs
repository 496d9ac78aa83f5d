//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on cs-infra, cs-platform and cs-app at once.
//! It assembles adapters behind their ports; it makes no decisions.
//! 仅负责组装，不做业务决策。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cs_app::usecases::CaptureClipboardUseCase;
use cs_app::{ChangeDetector, ClipShelf, HistoryEngine, PauseSwitch, RestoreGate};
use cs_core::config::{AppConfig, ConfigError};
use cs_core::ports::{ContentHashPort, SystemClipboardPort};
use cs_core::ContentClassifier;
use cs_infra::{FsHistoryStore, InfraThumbnailGenerator, Sha256Hasher, SystemClock};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Invalid history configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Fully assembled application.
pub struct AppRuntime {
    pub engine: Arc<HistoryEngine>,
    pub shelf: ClipShelf,
    pub detector: ChangeDetector,
    pub poll_interval: Duration,
}

/// Open the history store. Must run inside a tokio runtime (the writer is spawned).
pub fn open_store(history_dir: PathBuf) -> Arc<FsHistoryStore> {
    let hasher: Arc<dyn ContentHashPort> = Arc::new(Sha256Hasher);
    Arc::new(FsHistoryStore::spawn(history_dir, hasher))
}

pub fn wire_dependencies(
    config: &AppConfig,
    history_dir: PathBuf,
    clipboard: Arc<dyn SystemClipboardPort>,
) -> WiringResult<AppRuntime> {
    let history_config = config.history_config()?;
    let store = open_store(history_dir);

    let engine = Arc::new(HistoryEngine::new(
        store,
        clipboard.clone(),
        history_config,
        RestoreGate::new(config.restore_settle_delay()),
    ));

    let capture = CaptureClipboardUseCase::new(
        clipboard.clone(),
        ContentClassifier::new(Arc::new(InfraThumbnailGenerator::default())),
        Arc::new(Sha256Hasher),
        Arc::new(SystemClock),
        config.history.ignored_types.iter().cloned(),
    );

    let paused = PauseSwitch::new();
    let detector = ChangeDetector::new(clipboard.clone(), capture, engine.clone(), paused.clone());
    let shelf = ClipShelf::new(engine.clone(), clipboard, paused);

    Ok(AppRuntime {
        engine,
        shelf,
        detector,
        poll_interval: config.poll_interval(),
    })
}
