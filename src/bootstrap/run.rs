//! Command entry points.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cs_core::config::AppConfig;
use cs_core::ports::{HistoryStorePort, SystemClipboardPort};
use cs_core::ClipboardItem;
use cs_platform::RsClipboard;

use super::wiring::{open_store, wire_dependencies};

const LIST_PREVIEW_CHARS: usize = 60;

/// Watch the system clipboard until Ctrl-C, then drain pending writes.
pub async fn run_watcher(config: &AppConfig, history_dir: PathBuf) -> anyhow::Result<()> {
    let clipboard: Arc<dyn SystemClipboardPort> =
        Arc::new(RsClipboard::new().context("Failed to open the system clipboard")?);
    let runtime = wire_dependencies(config, history_dir.clone(), clipboard)?;

    let loaded = runtime.engine.load().await;
    info!(items = loaded, history_dir = %history_dir.display(), "clipshelf ready");

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(
        runtime
            .detector
            .run(runtime.poll_interval, cancel.clone()),
    );

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C, shutting down");
    }
    info!("shutting down");

    cancel.cancel();
    if let Err(err) = watcher.await {
        warn!(error = %err, "watcher task ended abnormally");
    }
    runtime.engine.flush().await;
    Ok(())
}

/// Print the persisted history, newest first.
pub async fn list_history(history_dir: PathBuf) -> anyhow::Result<()> {
    let store = open_store(history_dir);
    if let Err(err) = store.migrate_from_legacy_format().await {
        warn!(error = %err, "legacy migration failed");
    }
    let items = store.load_index().await?;
    if items.is_empty() {
        println!("history is empty");
    }
    for item in &items {
        println!("{}", format_list_line(item));
    }
    Ok(())
}

/// Delete every persisted item.
pub async fn clear_history(history_dir: PathBuf) -> anyhow::Result<()> {
    let store = open_store(history_dir);
    store.delete_all();
    store.flush().await;
    println!("history cleared");
    Ok(())
}

fn format_list_line(item: &ClipboardItem) -> String {
    let preview: String = item
        .preview_text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(LIST_PREVIEW_CHARS)
        .collect();
    format!(
        "{}  {}  {}  {}  {}",
        item.id,
        item.timestamp.format("%Y-%m-%d %H:%M:%S"),
        item.category,
        item.total_size,
        preview
    )
}
