//! Index file: lightweight metadata for the whole history, without raw bytes.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use cs_core::{Category, ClipboardItem, ContentHash, ItemId, RepresentationInfo};

use super::atomic::write_atomic;
use super::error::StoreError;
use super::layout::StoreLayout;

pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexFile {
    pub version: u32,
    pub items: Vec<IndexRecord>,
}

/// Index as read from disk, before individual records are validated.
#[derive(Deserialize)]
struct RawIndexFile {
    version: u32,
    items: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: ItemId,
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub preview_text: String,
    pub has_thumbnail: bool,
    pub total_size: u64,
    pub content_hash: ContentHash,
    pub representation_infos: Vec<RepresentationInfo>,
}

impl From<&ClipboardItem> for IndexRecord {
    fn from(item: &ClipboardItem) -> Self {
        Self {
            id: item.id.clone(),
            timestamp: item.timestamp,
            category: item.category,
            preview_text: item.preview_text.clone(),
            has_thumbnail: item.has_thumbnail(),
            total_size: item.total_size,
            content_hash: item.content_hash,
            representation_infos: item.representation_infos.clone(),
        }
    }
}

impl IndexRecord {
    pub fn into_item(self, thumbnail: Option<Vec<u8>>) -> ClipboardItem {
        ClipboardItem {
            id: self.id,
            timestamp: self.timestamp,
            category: self.category,
            preview_text: self.preview_text,
            thumbnail,
            total_size: self.total_size,
            content_hash: self.content_hash,
            representation_infos: self.representation_infos,
        }
    }
}

pub async fn write_index(layout: &StoreLayout, items: Vec<IndexRecord>) -> Result<()> {
    let file = IndexFile {
        version: INDEX_VERSION,
        items,
    };
    let bytes = serde_json::to_vec(&file).context("serialize history index")?;
    write_atomic(&layout.index_path(), &bytes).await
}

/// Read the index file. `Ok(None)` when there is no index yet.
pub async fn read_index(layout: &StoreLayout) -> Result<Option<IndexFile>> {
    let path = layout.index_path();
    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("read index {}", path.display()));
        }
    };

    let raw: RawIndexFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("decode index {}", path.display()))?;
    if raw.version != INDEX_VERSION {
        return Err(StoreError::UnsupportedIndexVersion(raw.version).into());
    }

    // Records are validated one by one; an invalid id drops only its own record.
    let items = raw
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(position, error = %err, "dropping invalid index record");
                None
            }
        })
        .collect();
    Ok(Some(IndexFile {
        version: raw.version,
        items,
    }))
}
