//! Polling change detector.
//! 轮询式剪贴板变化检测器。
//!
//! Each tick reads the clipboard change counter. A new value is recorded before
//! anything else, so a slow capture never processes the same change twice and
//! changes skipped while paused or restoring are never revisited.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};

use cs_core::ports::SystemClipboardPort;

use crate::facade::PauseSwitch;
use crate::history_engine::{HistoryEngine, InsertOutcome};
use crate::usecases::{CaptureClipboardUseCase, CaptureResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// First observation; the counter becomes the baseline.
    Baseline,
    Unchanged,
    SkippedPaused,
    SkippedRestoring,
    SkippedConcealed,
    SkippedEmpty,
    Captured(InsertOutcome),
}

pub struct ChangeDetector {
    clipboard: Arc<dyn SystemClipboardPort>,
    capture: CaptureClipboardUseCase,
    engine: Arc<HistoryEngine>,
    paused: PauseSwitch,
    last_change_count: Option<i64>,
}

impl ChangeDetector {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        capture: CaptureClipboardUseCase,
        engine: Arc<HistoryEngine>,
        paused: PauseSwitch,
    ) -> Self {
        Self {
            clipboard,
            capture,
            engine,
            paused,
            last_change_count: None,
        }
    }

    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let current = self.clipboard.change_count()?;
        let previous = self.last_change_count.replace(current);
        match previous {
            None => return Ok(TickOutcome::Baseline),
            Some(previous) if previous == current => return Ok(TickOutcome::Unchanged),
            Some(previous) => debug!(previous, current, "clipboard change detected"),
        }

        if self.paused.is_paused() {
            return Ok(TickOutcome::SkippedPaused);
        }
        if self.engine.is_restoring() {
            debug!("change caused by restore, skipping");
            return Ok(TickOutcome::SkippedRestoring);
        }

        match self.capture.execute()? {
            CaptureResult::Concealed { type_id } => {
                debug!(type_id = %type_id, "concealed snapshot, skipping");
                Ok(TickOutcome::SkippedConcealed)
            }
            CaptureResult::Empty => Ok(TickOutcome::SkippedEmpty),
            CaptureResult::Captured {
                item,
                representations,
            } => {
                let outcome = self.engine.insert(item, representations).await;
                Ok(TickOutcome::Captured(outcome))
            }
        }
    }

    /// Tick every `interval` until `cancel` fires. A failed tick is logged and
    /// polling continues.
    pub async fn run(mut self, interval: Duration, cancel: CancellationToken) {
        let span = info_span!("usecase.watcher.run", interval_ms = interval.as_millis() as u64);
        async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!("clipboard watcher started");

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(err) = self.tick().await {
                            error!(error = %err, "clipboard tick failed");
                        }
                    }
                }
            }

            info!("clipboard watcher stopped");
        }
        .instrument(span)
        .await
    }
}
