//! Read the current clipboard snapshot and turn it into a history item.
//! 读取当前剪贴板快照并生成历史条目。

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, warn};

use cs_core::clipboard::total_size;
use cs_core::ports::{ClockPort, ContentHashPort, SystemClipboardPort};
use cs_core::{ClipboardItem, ContentClassifier, ItemId, Representation};

#[derive(Debug)]
pub enum CaptureResult {
    /// A type in the ignore list was offered (password managers, transient copies).
    Concealed { type_id: String },
    /// Nothing readable was on the clipboard.
    Empty,
    Captured {
        item: ClipboardItem,
        representations: Vec<Representation>,
    },
}

pub struct CaptureClipboardUseCase {
    clipboard: Arc<dyn SystemClipboardPort>,
    classifier: ContentClassifier,
    hasher: Arc<dyn ContentHashPort>,
    clock: Arc<dyn ClockPort>,
    ignored_types: HashSet<String>,
}

impl CaptureClipboardUseCase {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        classifier: ContentClassifier,
        hasher: Arc<dyn ContentHashPort>,
        clock: Arc<dyn ClockPort>,
        ignored_types: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            clipboard,
            classifier,
            hasher,
            clock,
            ignored_types: ignored_types
                .into_iter()
                .map(|type_id| type_id.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn execute(&self) -> Result<CaptureResult> {
        let types = self.clipboard.available_types()?;
        if let Some(type_id) = types
            .iter()
            .find(|type_id| self.ignored_types.contains(&type_id.to_ascii_lowercase()))
        {
            return Ok(CaptureResult::Concealed {
                type_id: type_id.clone(),
            });
        }

        let representations = self.read_representations(&types);
        if representations.is_empty() {
            return Ok(CaptureResult::Empty);
        }

        let classification = self.classifier.classify(&representations);
        let content_hash = self.hasher.hash_representations(&representations);

        let item = ClipboardItem {
            id: ItemId::new(),
            timestamp: self.clock.now(),
            category: classification.category,
            preview_text: classification.preview_text,
            thumbnail: classification.thumbnail,
            total_size: total_size(&representations),
            content_hash,
            representation_infos: representations.iter().map(Representation::info).collect(),
        };
        Ok(CaptureResult::Captured {
            item,
            representations,
        })
    }

    /// Read every offered type in order. A type that fails to read or is empty
    /// is skipped; the rest of the snapshot is still captured.
    fn read_representations(&self, types: &[String]) -> Vec<Representation> {
        let mut seen = HashSet::new();
        let mut representations = Vec::with_capacity(types.len());
        for type_id in types {
            if !seen.insert(type_id.as_str()) {
                continue;
            }
            match self.clipboard.read(type_id) {
                Ok(Some(bytes)) if !bytes.is_empty() => {
                    representations.push(Representation::new(type_id.clone(), bytes));
                }
                Ok(_) => debug!(type_id = %type_id, "type offered without data"),
                Err(err) => warn!(type_id = %type_id, error = %err, "failed to read clipboard type"),
            }
        }
        representations
    }
}
