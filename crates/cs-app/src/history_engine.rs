//! History engine: owns the ordered history and coordinates persistence.
//! 历史引擎：持有有序历史列表并协调持久化顺序。
//!
//! Every mutation persists in the same order: new blobs, then the index, then
//! deletion of blobs that left the history. The store applies these FIFO, so
//! the index on disk never references a deleted blob directory.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, info_span, warn, Instrument};

use cs_core::history::policy;
use cs_core::ports::{HistoryStorePort, MigrationOutcome, SystemClipboardPort};
use cs_core::{ClipboardItem, HistoryConfig, ItemId, Representation};

use crate::restore_gate::RestoreGate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The item's category is excluded; nothing changed.
    Excluded,
    /// Inserted at the front. `removed` lists dedup replacements and evictions.
    Inserted { removed: Vec<ItemId> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored,
    /// No item with that id.
    NotFound,
    /// The blobs are gone or unreadable; the clipboard was left untouched.
    MissingContent,
}

struct EngineState {
    items: Vec<ClipboardItem>,
    config: HistoryConfig,
}

pub struct HistoryEngine {
    state: Mutex<EngineState>,
    store: Arc<dyn HistoryStorePort>,
    clipboard: Arc<dyn SystemClipboardPort>,
    restore_gate: RestoreGate,
    revision: watch::Sender<u64>,
}

impl HistoryEngine {
    pub fn new(
        store: Arc<dyn HistoryStorePort>,
        clipboard: Arc<dyn SystemClipboardPort>,
        config: HistoryConfig,
        restore_gate: RestoreGate,
    ) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: Mutex::new(EngineState {
                items: Vec::new(),
                config,
            }),
            store,
            clipboard,
            restore_gate,
            revision,
        }
    }

    /// Startup: migrate the legacy format, load the index, enforce the caps and
    /// remove orphaned blob directories. Returns the number of loaded items.
    ///
    /// Failures here are logged and degrade to an empty history.
    pub async fn load(&self) -> usize {
        let span = info_span!("usecase.history.load");
        async {
            match self.store.migrate_from_legacy_format().await {
                Ok(MigrationOutcome::NotNeeded) => {}
                Ok(outcome) => info!(?outcome, "legacy history handled"),
                Err(err) => warn!(error = %err, "legacy migration failed, legacy file left in place"),
            }

            // An unreadable index makes every blob directory look orphaned: start
            // empty and leave the disk alone.
            let mut items = match self.store.load_index().await {
                Ok(items) => items,
                Err(err) => {
                    warn!(error = %err, "failed to load history index, starting empty without cleanup");
                    let mut state = self.state.lock().await;
                    state.items.clear();
                    drop(state);
                    self.bump_revision();
                    return 0;
                }
            };

            let mut state = self.state.lock().await;
            let evicted = policy::enforce_limits(&mut items, &state.config);
            if !evicted.is_empty() {
                info!(count = evicted.len(), "evicted items over the configured caps");
                self.store.save_index(items.clone());
            }

            let valid: HashSet<ItemId> = items.iter().map(|item| item.id.clone()).collect();
            if let Err(err) = self.store.cleanup_orphans(&valid).await {
                warn!(error = %err, "orphan cleanup failed");
            }

            let count = items.len();
            state.items = items;
            drop(state);
            self.bump_revision();
            info!(count, "history loaded");
            count
        }
        .instrument(span)
        .await
    }

    pub async fn insert(
        &self,
        item: ClipboardItem,
        representations: Vec<Representation>,
    ) -> InsertOutcome {
        let span = info_span!(
            "usecase.history.insert",
            item_id = %item.id,
            category = ?item.category,
        );
        async {
            let mut state = self.state.lock().await;
            if state.config.is_excluded(item.category) {
                debug!("category excluded, not recording");
                return InsertOutcome::Excluded;
            }

            let id = item.id.clone();
            let thumbnail = item.thumbnail.clone();
            let config = state.config.clone();
            let removed = policy::insert_front(&mut state.items, item, &config);

            self.store.save_blobs(id, representations, thumbnail);
            self.store.save_index(state.items.clone());
            self.store.delete_blobs(removed.clone());
            let len = state.items.len();
            drop(state);

            self.bump_revision();
            debug!(removed = removed.len(), len, "item inserted");
            InsertOutcome::Inserted { removed }
        }
        .instrument(span)
        .await
    }

    /// Returns false when no item has `id`.
    pub async fn remove(&self, id: &ItemId) -> bool {
        let mut state = self.state.lock().await;
        if policy::remove(&mut state.items, id).is_none() {
            return false;
        }
        self.store.save_index(state.items.clone());
        self.store.delete_blobs(vec![id.clone()]);
        drop(state);

        self.bump_revision();
        info!(item_id = %id, "item removed");
        true
    }

    pub async fn remove_all(&self) {
        let mut state = self.state.lock().await;
        state.items.clear();
        self.store.delete_all();
        drop(state);

        self.bump_revision();
        info!("history cleared");
    }

    /// Write the item's representations back to the system clipboard and move
    /// it to the front.
    ///
    /// The restore gate is closed before the clipboard is written and released
    /// after the settle delay, so the detector skips the change this causes.
    pub async fn restore(&self, id: &ItemId) -> Result<RestoreOutcome> {
        let span = info_span!("usecase.history.restore", item_id = %id);
        async {
            let known = self.state.lock().await.items.iter().any(|item| &item.id == id);
            if !known {
                return Ok(RestoreOutcome::NotFound);
            }

            let generation = self.restore_gate.begin();
            let Some(representations) = self.store.load_representations(id).await else {
                self.restore_gate.release(generation);
                warn!("nothing to restore, blobs missing");
                return Ok(RestoreOutcome::MissingContent);
            };

            let written = self.clipboard.write(&representations);
            self.restore_gate.release_after_settle(generation);
            written?;

            let mut state = self.state.lock().await;
            if policy::move_to_front(&mut state.items, id) {
                self.store.save_index(state.items.clone());
            }
            drop(state);

            self.bump_revision();
            info!(representations = representations.len(), "item restored");
            Ok(RestoreOutcome::Restored)
        }
        .instrument(span)
        .await
    }

    /// Replace the limits and exclusions. Lowered caps evict immediately.
    pub async fn update_configuration(&self, config: HistoryConfig) -> Vec<ItemId> {
        let mut state = self.state.lock().await;
        let removed = policy::enforce_limits(&mut state.items, &config);
        state.config = config;
        if !removed.is_empty() {
            self.store.save_index(state.items.clone());
            self.store.delete_blobs(removed.clone());
        }
        drop(state);

        if !removed.is_empty() {
            self.bump_revision();
        }
        info!(evicted = removed.len(), "history configuration updated");
        removed
    }

    pub async fn list_items(&self) -> Vec<ClipboardItem> {
        self.state.lock().await.items.clone()
    }

    pub async fn configuration(&self) -> HistoryConfig {
        self.state.lock().await.config.clone()
    }

    pub fn is_restoring(&self) -> bool {
        self.restore_gate.is_restoring()
    }

    /// Revision counter bumped on every history mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Wait until every queued write has reached the store.
    pub async fn flush(&self) {
        self.store.flush().await;
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
