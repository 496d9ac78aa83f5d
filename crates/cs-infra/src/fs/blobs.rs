//! Per-item blob directories: one file per representation plus a descriptor.

use std::io::ErrorKind;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use cs_core::{ItemId, Representation};

use super::atomic::write_atomic;
use super::error::StoreError;
use super::layout::StoreLayout;

/// Ordered list of what a blob directory holds. Written last, so its presence
/// implies every listed file was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobDescriptor {
    pub representations: Vec<BlobEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobEntry {
    pub type_id: String,
    pub size: u64,
    pub file: String,
}

pub async fn write_blobs(
    layout: &StoreLayout,
    id: &ItemId,
    representations: &[Representation],
    thumbnail: Option<&[u8]>,
) -> Result<()> {
    let dir = layout.item_dir(id);
    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("create blob directory {}", dir.display()))?;

    let mut entries = Vec::with_capacity(representations.len());
    for (index, rep) in representations.iter().enumerate() {
        let file = StoreLayout::representation_file_name(index);
        let path = dir.join(&file);
        fs::write(&path, &rep.bytes)
            .await
            .with_context(|| format!("write representation {}", path.display()))?;
        entries.push(BlobEntry {
            type_id: rep.type_id.clone(),
            size: rep.size_bytes(),
            file,
        });
    }

    if let Some(thumbnail) = thumbnail {
        let path = layout.thumbnail_path(id);
        fs::write(&path, thumbnail)
            .await
            .with_context(|| format!("write thumbnail {}", path.display()))?;
    }

    let descriptor = BlobDescriptor {
        representations: entries,
    };
    let bytes = serde_json::to_vec(&descriptor).context("serialize blob descriptor")?;
    write_atomic(&layout.meta_path(id), &bytes).await
}

/// Reconstruct the representations of `id` in their original order.
///
/// `Ok(None)` when the descriptor is missing; an error when any listed file is
/// missing, unreadable or has a different size than recorded.
pub async fn read_representations(
    layout: &StoreLayout,
    id: &ItemId,
) -> Result<Option<Vec<Representation>>> {
    let meta_path = layout.meta_path(id);
    let meta_bytes = match fs::read(&meta_path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("read descriptor {}", meta_path.display()));
        }
    };
    let descriptor: BlobDescriptor = serde_json::from_slice(&meta_bytes)
        .with_context(|| format!("decode descriptor {}", meta_path.display()))?;

    let dir = layout.item_dir(id);
    let mut representations = Vec::with_capacity(descriptor.representations.len());
    for entry in descriptor.representations {
        let path = dir.join(&entry.file);
        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("read representation {}", path.display()))?;
        if bytes.len() as u64 != entry.size {
            return Err(StoreError::SizeMismatch {
                id: id.to_string(),
                file: entry.file,
                listed: entry.size,
                actual: bytes.len() as u64,
            }
            .into());
        }
        representations.push(Representation::new(entry.type_id, bytes));
    }
    Ok(Some(representations))
}

pub async fn read_thumbnail(layout: &StoreLayout, id: &ItemId) -> Result<Option<Vec<u8>>> {
    match fs::read(layout.thumbnail_path(id)).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).context("read thumbnail"),
    }
}

/// Remove the blob directory of `id`. Already-absent directories are not an error.
pub async fn remove_blobs(layout: &StoreLayout, id: &ItemId) -> Result<()> {
    let dir = layout.item_dir(id);
    match fs::remove_dir_all(&dir).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove blob directory {}", dir.display())),
    }
}
