use chrono::{DateTime, Utc};

use crate::clipboard::{Category, ContentHash, RepresentationInfo};
use crate::ids::ItemId;

/// Upper bound for `preview_text`, in UTF-16 code units.
pub const MAX_PREVIEW_UTF16_UNITS: usize = 500;

/// Record of one captured snapshot.
///
/// Only metadata lives here; the representation bytes are owned by the history store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub id: ItemId,
    /// Capture time, for ordering and display only (not part of identity).
    pub timestamp: DateTime<Utc>,
    pub category: Category,
    pub preview_text: String,
    pub thumbnail: Option<Vec<u8>>,
    pub total_size: u64,
    pub content_hash: ContentHash,
    pub representation_infos: Vec<RepresentationInfo>,
}

impl ClipboardItem {
    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }

    /// Whether `total_size` agrees with the stored representation infos.
    pub fn is_size_consistent(&self) -> bool {
        self.representation_infos.iter().map(|info| info.size).sum::<u64>() == self.total_size
    }
}
