//! Entry points for the presentation layer.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use cs_core::config::ConfigError;
use cs_core::ports::SystemClipboardPort;
use cs_core::{Category, ClipboardItem, HistoryConfig, ItemId};

use crate::history_engine::{HistoryEngine, RestoreOutcome};

/// User-toggleable pause flag shared between the facade and the detector.
#[derive(Clone, Default)]
pub struct PauseSwitch(Arc<AtomicBool>);

impl PauseSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::AcqRel)
    }
}

/// Query/command interface over the history engine.
#[derive(Clone)]
pub struct ClipShelf {
    engine: Arc<HistoryEngine>,
    clipboard: Arc<dyn SystemClipboardPort>,
    paused: PauseSwitch,
}

impl ClipShelf {
    pub fn new(
        engine: Arc<HistoryEngine>,
        clipboard: Arc<dyn SystemClipboardPort>,
        paused: PauseSwitch,
    ) -> Self {
        Self {
            engine,
            clipboard,
            paused,
        }
    }

    pub async fn list_items(&self) -> Vec<ClipboardItem> {
        self.engine.list_items().await
    }

    pub async fn restore(&self, id: &ItemId) -> Result<RestoreOutcome> {
        self.engine.restore(id).await
    }

    pub async fn remove(&self, id: &ItemId) -> bool {
        self.engine.remove(id).await
    }

    pub async fn remove_all(&self) {
        self.engine.remove_all().await
    }

    /// Returns true when capture is now paused.
    pub fn toggle_pause(&self) -> bool {
        let paused = self.paused.toggle();
        info!(paused, "capture pause toggled");
        paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_paused()
    }

    /// Returns the ids evicted by the new limits.
    pub async fn update_configuration(
        &self,
        max_items: usize,
        max_total_size_bytes: u64,
        excluded_categories: BTreeSet<Category>,
    ) -> Result<Vec<ItemId>, ConfigError> {
        if max_items == 0 {
            return Err(ConfigError::ZeroMaxItems);
        }
        let config = HistoryConfig {
            max_items,
            max_total_size_bytes,
            excluded_categories,
        };
        Ok(self.engine.update_configuration(config).await)
    }

    pub fn clear_clipboard(&self) -> Result<()> {
        self.clipboard.clear()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.engine.subscribe()
    }
}
