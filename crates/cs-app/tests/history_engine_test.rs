mod support;

use std::collections::BTreeSet;
use std::sync::Arc;

use cs_app::{HistoryEngine, InsertOutcome, RestoreGate, RestoreOutcome};
use cs_core::ports::SystemClipboardPort;
use cs_core::{Category, HistoryConfig};
use cs_platform::InMemoryClipboard;

use support::{config, text_item, RecordingStore, StoreOp, SETTLE};

fn engine(config: HistoryConfig) -> (Arc<HistoryEngine>, Arc<RecordingStore>, Arc<InMemoryClipboard>) {
    let store = Arc::new(RecordingStore::new());
    let clipboard = Arc::new(InMemoryClipboard::new());
    let engine = Arc::new(HistoryEngine::new(
        store.clone(),
        clipboard.clone(),
        config,
        RestoreGate::new(SETTLE),
    ));
    (engine, store, clipboard)
}

#[tokio::test]
async fn duplicate_content_replaces_the_old_entry() {
    let (engine, store, _) = engine(HistoryConfig::default());
    let (first, reps) = text_item("hello");
    let (other, other_reps) = text_item("other");
    let (again, again_reps) = text_item("hello");

    engine.insert(first.clone(), reps).await;
    engine.insert(other.clone(), other_reps).await;
    let outcome = engine.insert(again.clone(), again_reps).await;

    assert_eq!(
        outcome,
        InsertOutcome::Inserted {
            removed: vec![first.id.clone()]
        }
    );
    let ids: Vec<_> = engine.list_items().await.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![again.id.clone(), other.id.clone()]);
    assert!(!store.has_blobs(&first.id));
}

#[tokio::test]
async fn persists_blobs_then_index_then_deletions() {
    let (engine, store, _) = engine(config(1));
    let (a, a_reps) = text_item("a");
    let (b, b_reps) = text_item("b");
    engine.insert(a.clone(), a_reps).await;
    store.clear_ops();

    engine.insert(b.clone(), b_reps).await;

    assert_eq!(
        store.ops(),
        vec![
            StoreOp::SaveBlobs(b.id.clone()),
            StoreOp::SaveIndex(vec![b.id.clone()]),
            StoreOp::DeleteBlobs(vec![a.id.clone()]),
        ]
    );
}

#[tokio::test]
async fn count_cap_keeps_most_recent() {
    let (engine, _, _) = engine(config(2));
    let (a, a_reps) = text_item("A");
    let (b, b_reps) = text_item("B");
    let (c, c_reps) = text_item("C");

    engine.insert(a, a_reps).await;
    engine.insert(b.clone(), b_reps).await;
    engine.insert(c.clone(), c_reps).await;

    let ids: Vec<_> = engine.list_items().await.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![c.id, b.id]);
}

#[tokio::test]
async fn size_cap_keeps_at_least_one_item() {
    let (engine, _, _) = engine(HistoryConfig {
        max_items: 10,
        max_total_size_bytes: 4,
        excluded_categories: BTreeSet::new(),
    });
    let (small, small_reps) = text_item("abc");
    let (large, large_reps) = text_item("much too large");

    engine.insert(small, small_reps).await;
    engine.insert(large.clone(), large_reps).await;

    let items = engine.list_items().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, large.id);
}

#[tokio::test]
async fn excluded_categories_are_not_recorded() {
    let (engine, store, _) = engine(HistoryConfig {
        excluded_categories: [Category::PlainText].into_iter().collect(),
        ..HistoryConfig::default()
    });
    let (item, reps) = text_item("secret");

    assert_eq!(engine.insert(item, reps).await, InsertOutcome::Excluded);
    assert!(engine.list_items().await.is_empty());
    assert!(store.ops().is_empty());
}

#[tokio::test]
async fn remove_persists_index_and_deletes_blobs() {
    let (engine, store, _) = engine(HistoryConfig::default());
    let (item, reps) = text_item("bye");
    engine.insert(item.clone(), reps).await;
    store.clear_ops();

    assert!(engine.remove(&item.id).await);
    assert!(!engine.remove(&item.id).await);

    assert_eq!(
        store.ops(),
        vec![
            StoreOp::SaveIndex(vec![]),
            StoreOp::DeleteBlobs(vec![item.id.clone()]),
        ]
    );
}

#[tokio::test]
async fn remove_all_clears_memory_and_store() {
    let (engine, store, _) = engine(HistoryConfig::default());
    let (item, reps) = text_item("x");
    engine.insert(item.clone(), reps).await;

    engine.remove_all().await;

    assert!(engine.list_items().await.is_empty());
    assert_eq!(store.ops().last(), Some(&StoreOp::DeleteAll));
    assert!(!store.has_blobs(&item.id));
}

#[tokio::test(start_paused = true)]
async fn restore_writes_back_and_moves_to_front() {
    let (engine, store, clipboard) = engine(HistoryConfig::default());
    let (old, old_reps) = text_item("old");
    let (new, new_reps) = text_item("new");
    engine.insert(old.clone(), old_reps.clone()).await;
    engine.insert(new.clone(), new_reps).await;
    store.clear_ops();

    let outcome = engine.restore(&old.id).await.unwrap();

    assert_eq!(outcome, RestoreOutcome::Restored);
    assert_eq!(clipboard.contents().unwrap(), old_reps);
    assert!(engine.is_restoring());
    let ids: Vec<_> = engine.list_items().await.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![old.id.clone(), new.id.clone()]);
    assert_eq!(store.ops(), vec![StoreOp::SaveIndex(vec![old.id, new.id])]);

    tokio::time::sleep(SETTLE + std::time::Duration::from_millis(10)).await;
    assert!(!engine.is_restoring());
}

#[tokio::test]
async fn restore_with_missing_blobs_leaves_clipboard_untouched() {
    let (engine, store, clipboard) = engine(HistoryConfig::default());
    let (item, reps) = text_item("vanished");
    engine.insert(item.clone(), reps).await;
    store.drop_blobs(&item.id);

    let outcome = engine.restore(&item.id).await.unwrap();

    assert_eq!(outcome, RestoreOutcome::MissingContent);
    assert_eq!(clipboard.change_count().unwrap(), 0);
    assert!(!engine.is_restoring());
}

#[tokio::test]
async fn restore_unknown_id_is_not_found() {
    let (engine, _, _) = engine(HistoryConfig::default());
    let outcome = engine.restore(&cs_core::ItemId::new()).await.unwrap();
    assert_eq!(outcome, RestoreOutcome::NotFound);
}

#[tokio::test]
async fn lowering_caps_evicts_immediately() {
    let (engine, store, _) = engine(HistoryConfig::default());
    let mut inserted = Vec::new();
    for value in ["1", "2", "3"] {
        let (item, reps) = text_item(value);
        inserted.push(item.id.clone());
        engine.insert(item, reps).await;
    }
    store.clear_ops();

    let removed = engine.update_configuration(config(1)).await;

    assert_eq!(removed, vec![inserted[1].clone(), inserted[0].clone()]);
    assert_eq!(engine.list_items().await.len(), 1);
    assert_eq!(
        store.ops(),
        vec![
            StoreOp::SaveIndex(vec![inserted[2].clone()]),
            StoreOp::DeleteBlobs(removed),
        ]
    );
}

#[tokio::test]
async fn load_enforces_caps_and_removes_orphans() {
    let (a, a_reps) = text_item("a");
    let (b, _) = text_item("b");
    let store = Arc::new(RecordingStore::with_index(vec![a.clone(), b.clone()]));
    let (stray, stray_reps) = text_item("stray");
    {
        use cs_core::ports::HistoryStorePort;
        store.save_blobs(a.id.clone(), a_reps, None);
        store.save_blobs(stray.id.clone(), stray_reps, None);
    }
    let engine = HistoryEngine::new(
        store.clone(),
        Arc::new(InMemoryClipboard::new()),
        config(1),
        RestoreGate::new(SETTLE),
    );

    assert_eq!(engine.load().await, 1);
    assert_eq!(engine.list_items().await[0].id, a.id);
    assert!(store.has_blobs(&a.id));
    assert!(!store.has_blobs(&stray.id));
}

#[tokio::test]
async fn every_mutation_bumps_the_revision() {
    let (engine, _, _) = engine(HistoryConfig::default());
    let mut revisions = engine.subscribe();
    let start = *revisions.borrow_and_update();

    let (item, reps) = text_item("watch me");
    engine.insert(item.clone(), reps).await;
    assert!(revisions.has_changed().unwrap());
    engine.remove(&item.id).await;

    assert_eq!(*revisions.borrow_and_update(), start + 2);
}

#[tokio::test]
async fn unreadable_index_starts_empty_without_touching_the_store() {
    let (a, a_reps) = text_item("a");
    let store = Arc::new(RecordingStore::with_index(vec![a.clone()]));
    {
        use cs_core::ports::HistoryStorePort;
        store.save_blobs(a.id.clone(), a_reps, None);
    }
    store.clear_ops();
    store.fail_index_load();
    let engine = HistoryEngine::new(
        store.clone(),
        Arc::new(InMemoryClipboard::new()),
        config(1),
        RestoreGate::new(SETTLE),
    );

    assert_eq!(engine.load().await, 0);
    assert!(engine.list_items().await.is_empty());
    assert_eq!(store.cleanup_calls(), 0);
    assert!(store.ops().is_empty());
    assert!(store.has_blobs(&a.id));
}

mod on_disk {
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::TempDir;

    use cs_app::{HistoryEngine, RestoreGate, RestoreOutcome};
    use cs_core::{HistoryConfig, ItemId};
    use cs_infra::{FsHistoryStore, Sha256Hasher};
    use cs_platform::InMemoryClipboard;

    use crate::support::text_item;

    fn open(dir: &Path, clipboard: Arc<InMemoryClipboard>) -> HistoryEngine {
        let store = Arc::new(FsHistoryStore::spawn(dir.to_path_buf(), Arc::new(Sha256Hasher)));
        HistoryEngine::new(
            store,
            clipboard,
            HistoryConfig::default(),
            RestoreGate::new(Duration::from_millis(50)),
        )
    }

    async fn seed(dir: &Path, count: usize) -> Vec<ItemId> {
        let engine = open(dir, Arc::new(InMemoryClipboard::new()));
        engine.load().await;
        let mut ids = Vec::new();
        for n in 0..count {
            let (item, reps) = text_item(&format!("item {n}"));
            ids.push(item.id.clone());
            engine.insert(item, reps).await;
        }
        engine.flush().await;
        ids
    }

    fn blob_dirs(dir: &Path) -> usize {
        std::fs::read_dir(dir.join("blobs")).unwrap().count()
    }

    #[tokio::test]
    async fn corrupt_index_keeps_blobs_and_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        seed(dir.path(), 3).await;
        std::fs::write(dir.path().join("index.json"), b"{ not json").unwrap();

        let engine = open(dir.path(), Arc::new(InMemoryClipboard::new()));
        assert_eq!(engine.load().await, 0);
        engine.flush().await;

        assert_eq!(blob_dirs(dir.path()), 3);
        assert_eq!(
            std::fs::read(dir.path().join("index.json.bak")).unwrap(),
            b"{ not json"
        );
        assert!(!dir.path().join("index.json").exists());

        let (item, reps) = text_item("after");
        engine.insert(item, reps).await;
        engine.flush().await;
        assert_eq!(blob_dirs(dir.path()), 4);
        assert!(dir.path().join("index.json.bak").exists());
    }

    #[tokio::test]
    async fn index_with_unsupported_version_keeps_blobs() {
        let dir = TempDir::new().unwrap();
        seed(dir.path(), 3).await;
        let path = dir.path().join("index.json");
        let mut index: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        index["version"] = serde_json::json!(2);
        std::fs::write(&path, serde_json::to_vec(&index).unwrap()).unwrap();

        let engine = open(dir.path(), Arc::new(InMemoryClipboard::new()));
        assert_eq!(engine.load().await, 0);
        engine.flush().await;

        assert_eq!(blob_dirs(dir.path()), 3);
        assert!(dir.path().join("index.json.bak").exists());
    }

    #[tokio::test]
    async fn missing_descriptor_keeps_item_listed_but_restore_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let ids = seed(dir.path(), 1).await;
        std::fs::remove_file(dir.path().join("blobs").join(ids[0].as_str()).join("meta.json"))
            .unwrap();

        let clipboard = Arc::new(InMemoryClipboard::new());
        let engine = open(dir.path(), clipboard.clone());
        assert_eq!(engine.load().await, 1);
        assert_eq!(engine.list_items().await[0].id, ids[0]);

        assert_eq!(
            engine.restore(&ids[0]).await.unwrap(),
            RestoreOutcome::MissingContent
        );
        assert_eq!(clipboard.write_count().unwrap(), 0);
        assert!(!engine.is_restoring());
    }
}
