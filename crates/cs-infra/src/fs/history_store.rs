//! Filesystem history store with a single background writer.
//! 基于文件系统的历史存储，所有写操作由单个后台任务按提交顺序执行。

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, info_span, warn, Instrument};

use cs_core::ports::{ContentHashPort, HistoryStorePort, MigrationOutcome};
use cs_core::{ClipboardItem, ItemId, Representation};

use super::blobs::{read_representations, read_thumbnail, remove_blobs, write_blobs};
use super::index::{read_index, write_index, IndexRecord};
use super::layout::StoreLayout;
use super::legacy;

enum StoreCommand {
    SaveIndex(Vec<IndexRecord>),
    SaveBlobs {
        id: ItemId,
        representations: Vec<Representation>,
        thumbnail: Option<Vec<u8>>,
    },
    DeleteBlobs(Vec<ItemId>),
    DeleteAll,
    LoadRepresentations {
        id: ItemId,
        reply: oneshot::Sender<Option<Vec<Representation>>>,
    },
    CleanupOrphans {
        valid_ids: HashSet<ItemId>,
        reply: oneshot::Sender<Result<usize>>,
    },
    Flush(oneshot::Sender<()>),
}

impl StoreCommand {
    fn name(&self) -> &'static str {
        match self {
            StoreCommand::SaveIndex(_) => "save_index",
            StoreCommand::SaveBlobs { .. } => "save_blobs",
            StoreCommand::DeleteBlobs(_) => "delete_blobs",
            StoreCommand::DeleteAll => "delete_all",
            StoreCommand::LoadRepresentations { .. } => "load_representations",
            StoreCommand::CleanupOrphans { .. } => "cleanup_orphans",
            StoreCommand::Flush(_) => "flush",
        }
    }
}

/// Handle to the store. Cloning shares the same writer queue.
#[derive(Clone)]
pub struct FsHistoryStore {
    layout: StoreLayout,
    tx: mpsc::UnboundedSender<StoreCommand>,
    hasher: Arc<dyn ContentHashPort>,
}

impl FsHistoryStore {
    /// Create the store rooted at `root` and spawn its writer on the current runtime.
    ///
    /// The writer drains every queued command and exits once all handles are dropped.
    pub fn spawn(root: PathBuf, hasher: Arc<dyn ContentHashPort>) -> Self {
        let layout = StoreLayout::new(root);
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = HistoryStoreWorker {
            layout: layout.clone(),
            rx,
        };
        tokio::spawn(worker.run());
        Self { layout, tx, hasher }
    }

    pub fn root(&self) -> &std::path::Path {
        self.layout.root()
    }

    fn enqueue(&self, command: StoreCommand) {
        let name = command.name();
        if self.tx.send(command).is_err() {
            error!(command = name, "history store writer is gone, dropping command");
        }
    }
}

#[async_trait]
impl HistoryStorePort for FsHistoryStore {
    fn save_index(&self, items: Vec<ClipboardItem>) {
        let records = items.iter().map(IndexRecord::from).collect();
        self.enqueue(StoreCommand::SaveIndex(records));
    }

    fn save_blobs(
        &self,
        id: ItemId,
        representations: Vec<Representation>,
        thumbnail: Option<Vec<u8>>,
    ) {
        self.enqueue(StoreCommand::SaveBlobs {
            id,
            representations,
            thumbnail,
        });
    }

    fn delete_blobs(&self, ids: Vec<ItemId>) {
        if ids.is_empty() {
            return;
        }
        self.enqueue(StoreCommand::DeleteBlobs(ids));
    }

    fn delete_all(&self) {
        self.enqueue(StoreCommand::DeleteAll);
    }

    async fn flush(&self) {
        let (reply, done) = oneshot::channel();
        self.enqueue(StoreCommand::Flush(reply));
        // A closed channel means the writer already exited, so nothing is pending.
        let _ = done.await;
    }

    async fn load_index(&self) -> Result<Vec<ClipboardItem>> {
        let index = match read_index(&self.layout).await {
            Ok(Some(index)) => index,
            Ok(None) => {
                debug!(root = %self.layout.root().display(), "no history index yet");
                return Ok(Vec::new());
            }
            Err(err) => {
                set_aside_unreadable_index(&self.layout).await;
                return Err(err);
            }
        };

        let mut items = Vec::with_capacity(index.items.len());
        for record in index.items {
            let thumbnail = if record.has_thumbnail {
                match read_thumbnail(&self.layout, &record.id).await {
                    Ok(Some(bytes)) => Some(bytes),
                    Ok(None) => {
                        warn!(item_id = %record.id, "thumbnail missing, dropping flag");
                        None
                    }
                    Err(err) => {
                        warn!(item_id = %record.id, error = %err, "failed to read thumbnail");
                        None
                    }
                }
            } else {
                None
            };
            items.push(record.into_item(thumbnail));
        }
        info!(count = items.len(), "loaded history index");
        Ok(items)
    }

    async fn load_representations(&self, id: &ItemId) -> Option<Vec<Representation>> {
        let (reply, response) = oneshot::channel();
        let command = StoreCommand::LoadRepresentations {
            id: id.clone(),
            reply,
        };
        if self.tx.send(command).is_err() {
            // Writer gone: no pending writes can be overtaken, read directly.
            return load_or_log(&self.layout, id).await;
        }
        response.await.ok().flatten()
    }

    async fn cleanup_orphans(&self, valid_ids: &HashSet<ItemId>) -> Result<usize> {
        let (reply, response) = oneshot::channel();
        let command = StoreCommand::CleanupOrphans {
            valid_ids: valid_ids.clone(),
            reply,
        };
        if self.tx.send(command).is_err() {
            return remove_orphans(&self.layout, valid_ids).await;
        }
        response
            .await
            .context("history store writer dropped cleanup request")?
    }

    async fn migrate_from_legacy_format(&self) -> Result<MigrationOutcome> {
        // Pending writes would race with the migrated index.
        self.flush().await;
        legacy::migrate(&self.layout, self.hasher.as_ref()).await
    }
}

/// Background writer. Applies commands strictly in submission order.
/// 后台写入任务，严格按照提交顺序执行命令。
struct HistoryStoreWorker {
    layout: StoreLayout,
    rx: mpsc::UnboundedReceiver<StoreCommand>,
}

impl HistoryStoreWorker {
    async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            let span = info_span!("infra.history_store.worker", command = command.name());
            self.handle(command).instrument(span).await;
        }
        debug!("history store writer stopped");
    }

    async fn handle(&self, command: StoreCommand) {
        match command {
            StoreCommand::SaveIndex(records) => {
                let count = records.len();
                if let Err(err) = write_index(&self.layout, records).await {
                    error!(error = %err, count, "failed to write history index");
                }
            }
            StoreCommand::SaveBlobs {
                id,
                representations,
                thumbnail,
            } => {
                if let Err(err) =
                    write_blobs(&self.layout, &id, &representations, thumbnail.as_deref()).await
                {
                    error!(item_id = %id, error = %err, "failed to write blobs");
                }
            }
            StoreCommand::DeleteBlobs(ids) => {
                for id in ids {
                    if let Err(err) = remove_blobs(&self.layout, &id).await {
                        warn!(item_id = %id, error = %err, "failed to delete blobs");
                    }
                }
            }
            StoreCommand::DeleteAll => {
                if let Err(err) = delete_all(&self.layout).await {
                    error!(error = %err, "failed to delete history");
                }
            }
            StoreCommand::LoadRepresentations { id, reply } => {
                let _ = reply.send(load_or_log(&self.layout, &id).await);
            }
            StoreCommand::CleanupOrphans { valid_ids, reply } => {
                let _ = reply.send(remove_orphans(&self.layout, &valid_ids).await);
            }
            StoreCommand::Flush(reply) => {
                let _ = reply.send(());
            }
        }
    }
}

async fn load_or_log(layout: &StoreLayout, id: &ItemId) -> Option<Vec<Representation>> {
    match read_representations(layout, id).await {
        Ok(Some(representations)) => Some(representations),
        Ok(None) => {
            warn!(item_id = %id, "blob descriptor missing");
            None
        }
        Err(err) => {
            warn!(item_id = %id, error = %err, "failed to load representations");
            None
        }
    }
}

/// Move an index that failed to load out of the way, so the next index write
/// cannot overwrite it.
async fn set_aside_unreadable_index(layout: &StoreLayout) {
    let from = layout.index_path();
    let to = layout.unreadable_index_path();
    match fs::rename(&from, &to).await {
        Ok(()) => warn!(path = %to.display(), "unreadable history index moved aside"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => error!(path = %from.display(), error = %err, "failed to move unreadable index aside"),
    }
}

async fn delete_all(layout: &StoreLayout) -> Result<()> {
    for path in [layout.index_path(), layout.unreadable_index_path()] {
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("remove {}", path.display()));
            }
        }
    }
    match fs::remove_dir_all(layout.blobs_dir()).await {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err).context("remove blobs directory"),
    }
    info!("history store cleared");
    Ok(())
}

/// Delete every blob directory whose name is not a valid id in `valid_ids`.
async fn remove_orphans(layout: &StoreLayout, valid_ids: &HashSet<ItemId>) -> Result<usize> {
    let blobs_dir = layout.blobs_dir();
    let mut entries = match fs::read_dir(&blobs_dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
        Err(err) => {
            return Err(err).with_context(|| format!("list {}", blobs_dir.display()));
        }
    };

    let mut removed = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("list {}", blobs_dir.display()))?
    {
        let name = entry.file_name();
        let keep = name
            .to_str()
            .and_then(ItemId::parse)
            .is_some_and(|id| valid_ids.contains(&id));
        if keep {
            continue;
        }

        let path = entry.path();
        let result = if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
            fs::remove_dir_all(&path).await
        } else {
            fs::remove_file(&path).await
        };
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "removed orphaned blob entry");
                removed += 1;
            }
            Err(err) => warn!(path = %path.display(), error = %err, "failed to remove orphan"),
        }
    }

    if removed > 0 {
        info!(removed, "cleaned up orphaned blobs");
    }
    Ok(removed)
}
