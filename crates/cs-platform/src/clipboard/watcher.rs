//! Event-driven change counter for platforms without a native one.
//! 无原生变更计数的平台上，由 clipboard-rs 的监听线程驱动计数器。

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use clipboard_rs::{
    ClipboardHandler, ClipboardWatcher as RSClipboardWatcher, ClipboardWatcherContext,
    WatcherShutdown,
};
use tracing::{debug, info};

/// Bumps a shared counter on every clipboard change notification.
pub struct ChangeCountHandler {
    counter: Arc<AtomicI64>,
}

impl ChangeCountHandler {
    pub fn new(counter: Arc<AtomicI64>) -> Self {
        Self { counter }
    }
}

impl ClipboardHandler for ChangeCountHandler {
    fn on_clipboard_change(&mut self) {
        let count = self.counter.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(count, "clipboard change notified");
    }
}

/// Background clipboard watch. Reading the count is a single atomic load, so
/// the polling tick never touches clipboard content.
pub struct ChangeWatcher {
    counter: Arc<AtomicI64>,
    shutdown: Mutex<Option<WatcherShutdown>>,
}

impl ChangeWatcher {
    pub fn start() -> Result<Self> {
        let counter = Arc::new(AtomicI64::new(0));
        let mut watcher_ctx = ClipboardWatcherContext::new()
            .map_err(|e| anyhow!("Failed to create watcher context: {}", e))?;
        let shutdown = watcher_ctx
            .add_handler(ChangeCountHandler::new(counter.clone()))
            .get_shutdown_channel();

        std::thread::Builder::new()
            .name("clipboard-watch".into())
            .spawn(move || {
                info!("start clipboard watch");
                watcher_ctx.start_watch();
                info!("clipboard watch stopped");
            })
            .context("spawn clipboard watch thread")?;

        Ok(Self {
            counter,
            shutdown: Mutex::new(Some(shutdown)),
        })
    }

    pub fn change_count(&self) -> i64 {
        self.counter.load(Ordering::Acquire)
    }
}

impl Drop for ChangeWatcher {
    fn drop(&mut self) {
        if let Ok(shutdown) = self.shutdown.get_mut() {
            if let Some(shutdown) = shutdown.take() {
                shutdown.stop();
            }
        }
    }
}
