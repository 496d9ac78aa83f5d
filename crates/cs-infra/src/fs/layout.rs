use std::path::{Path, PathBuf};

use cs_core::ItemId;

const INDEX_FILE_NAME: &str = "index.json";
const UNREADABLE_INDEX_FILE_NAME: &str = "index.json.bak";
const LEGACY_FILE_NAME: &str = "history.json";
const BLOBS_DIR: &str = "blobs";
const BLOB_META_FILE_NAME: &str = "meta.json";
const THUMBNAIL_FILE_NAME: &str = "thumbnail.webp";

/// On-disk layout of the history store.
///
/// ```text
/// <root>/index.json
/// <root>/index.json.bak        (an index that failed to load, kept for inspection)
/// <root>/history.json            (legacy, migrated on startup)
/// <root>/blobs/<id>/meta.json
/// <root>/blobs/<id>/rep-<n>.bin
/// <root>/blobs/<id>/thumbnail.webp
/// ```
#[derive(Debug, Clone)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }

    pub fn unreadable_index_path(&self) -> PathBuf {
        self.root.join(UNREADABLE_INDEX_FILE_NAME)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.root.join(LEGACY_FILE_NAME)
    }

    pub fn blobs_dir(&self) -> PathBuf {
        self.root.join(BLOBS_DIR)
    }

    pub fn item_dir(&self, id: &ItemId) -> PathBuf {
        self.blobs_dir().join(id.as_str())
    }

    pub fn meta_path(&self, id: &ItemId) -> PathBuf {
        self.item_dir(id).join(BLOB_META_FILE_NAME)
    }

    pub fn thumbnail_path(&self, id: &ItemId) -> PathBuf {
        self.item_dir(id).join(THUMBNAIL_FILE_NAME)
    }

    pub fn representation_file_name(index: usize) -> String {
        format!("rep-{index}.bin")
    }
}
