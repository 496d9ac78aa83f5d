use std::collections::BTreeSet;

use crate::clipboard::Category;

pub const DEFAULT_MAX_ITEMS: usize = 50;
pub const DEFAULT_MAX_TOTAL_SIZE_BYTES: u64 = 512 * 1024 * 1024;

/// Limits the history engine enforces on every insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    pub max_items: usize,
    pub max_total_size_bytes: u64,
    pub excluded_categories: BTreeSet<Category>,
}

impl HistoryConfig {
    pub fn is_excluded(&self, category: Category) -> bool {
        self.excluded_categories.contains(&category)
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            max_total_size_bytes: DEFAULT_MAX_TOTAL_SIZE_BYTES,
            excluded_categories: BTreeSet::new(),
        }
    }
}
