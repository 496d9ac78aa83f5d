#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use cs_app::usecases::CaptureClipboardUseCase;
use cs_app::{ChangeDetector, HistoryEngine, PauseSwitch, RestoreGate};
use cs_core::ports::{ClockPort, ContentHashPort, HistoryStorePort, MigrationOutcome};
use cs_core::{
    Category, ClipboardItem, ContentClassifier, HistoryConfig, ItemId, Representation,
};
use cs_infra::{InfraThumbnailGenerator, Sha256Hasher};
use cs_platform::InMemoryClipboard;

pub const SETTLE: Duration = Duration::from_millis(500);

/// Store operation as observed by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    SaveBlobs(ItemId),
    SaveIndex(Vec<ItemId>),
    DeleteBlobs(Vec<ItemId>),
    DeleteAll,
}

/// In-memory store that records the order of mutations.
#[derive(Default)]
pub struct RecordingStore {
    ops: Mutex<Vec<StoreOp>>,
    blobs: Mutex<HashMap<ItemId, Vec<Representation>>>,
    index: Mutex<Vec<ClipboardItem>>,
    index_unreadable: AtomicBool,
    cleanup_calls: AtomicUsize,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index(items: Vec<ClipboardItem>) -> Self {
        let store = Self::default();
        *store.index.lock().unwrap() = items;
        store
    }

    /// Make every following `load_index` fail, as for a corrupt index file.
    pub fn fail_index_load(&self) {
        self.index_unreadable.store(true, Ordering::SeqCst);
    }

    pub fn cleanup_calls(&self) -> usize {
        self.cleanup_calls.load(Ordering::SeqCst)
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.lock().unwrap().clone()
    }

    pub fn clear_ops(&self) {
        self.ops.lock().unwrap().clear();
    }

    pub fn has_blobs(&self, id: &ItemId) -> bool {
        self.blobs.lock().unwrap().contains_key(id)
    }

    pub fn drop_blobs(&self, id: &ItemId) {
        self.blobs.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl HistoryStorePort for RecordingStore {
    fn save_index(&self, items: Vec<ClipboardItem>) {
        let ids = items.iter().map(|item| item.id.clone()).collect();
        self.ops.lock().unwrap().push(StoreOp::SaveIndex(ids));
        *self.index.lock().unwrap() = items;
    }

    fn save_blobs(
        &self,
        id: ItemId,
        representations: Vec<Representation>,
        _thumbnail: Option<Vec<u8>>,
    ) {
        self.ops.lock().unwrap().push(StoreOp::SaveBlobs(id.clone()));
        self.blobs.lock().unwrap().insert(id, representations);
    }

    fn delete_blobs(&self, ids: Vec<ItemId>) {
        if ids.is_empty() {
            return;
        }
        let mut blobs = self.blobs.lock().unwrap();
        for id in &ids {
            blobs.remove(id);
        }
        self.ops.lock().unwrap().push(StoreOp::DeleteBlobs(ids));
    }

    fn delete_all(&self) {
        self.ops.lock().unwrap().push(StoreOp::DeleteAll);
        self.blobs.lock().unwrap().clear();
        self.index.lock().unwrap().clear();
    }

    async fn flush(&self) {}

    async fn load_index(&self) -> Result<Vec<ClipboardItem>> {
        if self.index_unreadable.load(Ordering::SeqCst) {
            return Err(anyhow!("decode index: expected value at line 1 column 1"));
        }
        Ok(self.index.lock().unwrap().clone())
    }

    async fn load_representations(&self, id: &ItemId) -> Option<Vec<Representation>> {
        self.blobs.lock().unwrap().get(id).cloned()
    }

    async fn cleanup_orphans(&self, valid_ids: &HashSet<ItemId>) -> Result<usize> {
        self.cleanup_calls.fetch_add(1, Ordering::SeqCst);
        let mut blobs = self.blobs.lock().unwrap();
        let before = blobs.len();
        blobs.retain(|id, _| valid_ids.contains(id));
        Ok(before - blobs.len())
    }

    async fn migrate_from_legacy_format(&self) -> Result<MigrationOutcome> {
        Ok(MigrationOutcome::NotNeeded)
    }
}

/// Clock that advances one second per reading.
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn new() -> Self {
        Self {
            next: Mutex::new(Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()),
        }
    }
}

impl ClockPort for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + chrono::Duration::seconds(1);
        now
    }
}

pub fn text(value: &str) -> Vec<Representation> {
    vec![Representation::new(
        "public.utf8-plain-text",
        value.as_bytes().to_vec(),
    )]
}

/// A plain-text item built the way the capture pipeline builds it.
pub fn text_item(value: &str) -> (ClipboardItem, Vec<Representation>) {
    let representations = text(value);
    let item = ClipboardItem {
        id: ItemId::new(),
        timestamp: Utc::now(),
        category: Category::PlainText,
        preview_text: value.to_string(),
        thumbnail: None,
        total_size: cs_core::clipboard::total_size(&representations),
        content_hash: Sha256Hasher.hash_representations(&representations),
        representation_infos: representations.iter().map(Representation::info).collect(),
    };
    (item, representations)
}

pub fn config(max_items: usize) -> HistoryConfig {
    HistoryConfig {
        max_items,
        ..HistoryConfig::default()
    }
}

pub struct Harness {
    pub clipboard: Arc<InMemoryClipboard>,
    pub store: Arc<RecordingStore>,
    pub engine: Arc<HistoryEngine>,
    pub paused: PauseSwitch,
    pub detector: ChangeDetector,
}

pub fn harness(config: HistoryConfig) -> Harness {
    let clipboard = Arc::new(InMemoryClipboard::new());
    let store = Arc::new(RecordingStore::new());
    let engine = Arc::new(HistoryEngine::new(
        store.clone(),
        clipboard.clone(),
        config,
        RestoreGate::new(SETTLE),
    ));
    let paused = PauseSwitch::new();
    let capture = CaptureClipboardUseCase::new(
        clipboard.clone(),
        ContentClassifier::new(Arc::new(InfraThumbnailGenerator::default())),
        Arc::new(Sha256Hasher),
        Arc::new(SteppingClock::new()),
        cs_core::config::DEFAULT_IGNORED_TYPES
            .iter()
            .map(|s| s.to_string()),
    );
    let detector = ChangeDetector::new(clipboard.clone(), capture, engine.clone(), paused.clone());
    Harness {
        clipboard,
        store,
        engine,
        paused,
        detector,
    }
}
