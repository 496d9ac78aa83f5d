//! History store port - durable storage for the index and per-item blobs.

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::{ClipboardItem, Representation};
use crate::ids::ItemId;

/// Result of the one-time legacy format upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No legacy file present.
    NotNeeded,
    /// A current-format index already existed; the legacy file was deleted unread.
    DiscardedStale,
    /// Legacy records were converted and the legacy file removed.
    Migrated { items: usize },
}

/// Durable key-value storage keyed by item id.
///
/// Mutations are fire-and-forget: they are queued on a single background writer
/// and applied in submission order. Callers never wait on disk I/O; failures are
/// logged by the store. Reads and startup maintenance are awaited.
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// Replace the index with metadata for `items` (atomic write).
    fn save_index(&self, items: Vec<ClipboardItem>);

    /// Persist raw representation bytes, the optional thumbnail and the descriptor for `id`.
    fn save_blobs(&self, id: ItemId, representations: Vec<Representation>, thumbnail: Option<Vec<u8>>);

    fn delete_blobs(&self, ids: Vec<ItemId>);

    /// Remove the index and every blob directory.
    fn delete_all(&self);

    /// Resolve once every mutation queued before this call has been applied.
    async fn flush(&self);

    /// Load the index; a missing index means empty history.
    async fn load_index(&self) -> Result<Vec<ClipboardItem>>;

    /// Reconstruct the representations of `id`, or `None` on any miss.
    async fn load_representations(&self, id: &ItemId) -> Option<Vec<Representation>>;

    /// Delete blob directories that do not belong to `valid_ids`. Returns how many were removed.
    async fn cleanup_orphans(&self, valid_ids: &HashSet<ItemId>) -> Result<usize>;

    async fn migrate_from_legacy_format(&self) -> Result<MigrationOutcome>;
}
