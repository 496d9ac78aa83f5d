//! One-time upgrade from the single-file `history.json` format.

use std::io::ErrorKind;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tokio::fs;
use tracing::{info, warn};

use cs_core::ports::{ContentHashPort, MigrationOutcome};
use cs_core::{
    clipboard::total_size, Category, ClipboardItem, ContentHash, ItemId, Representation,
};

use super::blobs::write_blobs;
use super::index::{write_index, IndexRecord};
use super::layout::StoreLayout;

/// Full record as written by the legacy store: metadata plus inline bytes.
#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    preview_text: String,
    #[serde(default)]
    representations: Vec<LegacyRepresentation>,
    #[serde(default, deserialize_with = "base64_opt")]
    thumbnail: Option<Vec<u8>>,
    #[serde(default)]
    content_hash: Option<ContentHash>,
}

#[derive(Debug, Deserialize)]
struct LegacyRepresentation {
    type_id: String,
    #[serde(deserialize_with = "base64_bytes")]
    data: Vec<u8>,
}

fn base64_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}

fn base64_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    let encoded: Option<String> = Option::deserialize(deserializer)?;
    encoded
        .map(|encoded| STANDARD.decode(encoded.as_bytes()))
        .transpose()
        .map_err(serde::de::Error::custom)
}

impl LegacyRecord {
    fn into_item(self, hasher: &dyn ContentHashPort) -> (ClipboardItem, Vec<Representation>) {
        let id = self
            .id
            .as_deref()
            .and_then(ItemId::parse)
            .unwrap_or_else(ItemId::new);
        let category = self
            .category
            .as_deref()
            .and_then(|tag| tag.parse::<Category>().ok())
            .unwrap_or(Category::Other);
        let representations: Vec<Representation> = self
            .representations
            .into_iter()
            .map(|rep| Representation::new(rep.type_id, rep.data))
            .collect();
        let content_hash = self
            .content_hash
            .unwrap_or_else(|| hasher.hash_representations(&representations));

        let item = ClipboardItem {
            id,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            category,
            preview_text: self.preview_text,
            thumbnail: self.thumbnail,
            total_size: total_size(&representations),
            content_hash,
            representation_infos: representations.iter().map(Representation::info).collect(),
        };
        (item, representations)
    }
}

/// Convert `history.json` into the index + blobs layout.
///
/// The legacy file is removed after a successful conversion, or unread when an
/// index already exists. On any read, decode or write failure it is left in place.
pub async fn migrate(layout: &StoreLayout, hasher: &dyn ContentHashPort) -> Result<MigrationOutcome> {
    let legacy_path = layout.legacy_path();
    if !fs::try_exists(&legacy_path).await.unwrap_or(false) {
        return Ok(MigrationOutcome::NotNeeded);
    }

    if fs::try_exists(layout.index_path()).await.unwrap_or(false) {
        remove_legacy(layout).await?;
        info!(path = %legacy_path.display(), "discarded legacy history file, index already present");
        return Ok(MigrationOutcome::DiscardedStale);
    }

    let bytes = fs::read(&legacy_path)
        .await
        .with_context(|| format!("read legacy history {}", legacy_path.display()))?;
    let records: Vec<LegacyRecord> = serde_json::from_slice(&bytes)
        .with_context(|| format!("decode legacy history {}", legacy_path.display()))?;

    let mut index = Vec::with_capacity(records.len());
    for record in records {
        let (item, representations) = record.into_item(hasher);
        write_blobs(layout, &item.id, &representations, item.thumbnail.as_deref())
            .await
            .with_context(|| format!("migrate blobs for {}", item.id))?;
        index.push(IndexRecord::from(&item));
    }

    let items = index.len();
    write_index(layout, index)
        .await
        .context("write migrated index")?;
    if let Err(err) = remove_legacy(layout).await {
        // The index now exists, so the next start discards the file anyway.
        warn!(error = %err, "migrated legacy history but could not remove it");
    }

    info!(items, "migrated legacy history");
    Ok(MigrationOutcome::Migrated { items })
}

async fn remove_legacy(layout: &StoreLayout) -> Result<()> {
    match fs::remove_file(layout.legacy_path()).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("remove legacy history file"),
    }
}
