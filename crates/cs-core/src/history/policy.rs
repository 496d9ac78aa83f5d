//! Dedup and eviction rules for the ordered history.
//!
//! The history is most-recent-first: index 0 is the newest or most recently
//! restored item. These functions only mutate the in-memory list and report
//! which ids left it, so the caller can delete their blobs after the new
//! index is durable.

use crate::clipboard::ClipboardItem;
use crate::config::HistoryConfig;
use crate::ids::ItemId;

/// Insert `item` at the front, replacing any item with the same content hash,
/// then enforce the count and size caps. Returns the ids that were dropped.
pub fn insert_front(
    items: &mut Vec<ClipboardItem>,
    item: ClipboardItem,
    config: &HistoryConfig,
) -> Vec<ItemId> {
    let mut removed = Vec::new();

    items.retain(|existing| {
        if existing.content_hash == item.content_hash {
            removed.push(existing.id.clone());
            false
        } else {
            true
        }
    });

    items.insert(0, item);
    removed.extend(enforce_limits(items, config));
    removed
}

/// Trim the tail until both caps hold. A single item is always kept, even if it
/// alone exceeds the size cap.
pub fn enforce_limits(items: &mut Vec<ClipboardItem>, config: &HistoryConfig) -> Vec<ItemId> {
    let mut removed = Vec::new();

    let max_items = config.max_items.max(1);
    if items.len() > max_items {
        removed.extend(items.drain(max_items..).map(|evicted| evicted.id));
    }

    let mut total: u64 = total_size(items);
    while items.len() > 1 && total > config.max_total_size_bytes {
        if let Some(evicted) = items.pop() {
            total = total.saturating_sub(evicted.total_size);
            removed.push(evicted.id);
        }
    }

    removed
}

/// Move the item with `id` to the front. Returns false when it is not in the list.
pub fn move_to_front(items: &mut Vec<ClipboardItem>, id: &ItemId) -> bool {
    match items.iter().position(|item| &item.id == id) {
        Some(0) => true,
        Some(index) => {
            let item = items.remove(index);
            items.insert(0, item);
            true
        }
        None => false,
    }
}

pub fn remove(items: &mut Vec<ClipboardItem>, id: &ItemId) -> Option<ClipboardItem> {
    let index = items.iter().position(|item| &item.id == id)?;
    Some(items.remove(index))
}

pub fn total_size(items: &[ClipboardItem]) -> u64 {
    items.iter().map(|item| item.total_size).sum()
}
