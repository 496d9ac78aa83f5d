//! Suppression window for clipboard changes caused by our own restores.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

/// Tracks whether a restore is in flight.
///
/// Every restore takes a new generation. The gate is closed ("restoring")
/// while the newest generation has not been released, so the settle timer of
/// an earlier restore never reopens the gate for a later one.
#[derive(Clone)]
pub struct RestoreGate {
    inner: Arc<GateState>,
    settle_delay: Duration,
}

struct GateState {
    started: AtomicU64,
    released: AtomicU64,
}

impl RestoreGate {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            inner: Arc::new(GateState {
                started: AtomicU64::new(0),
                released: AtomicU64::new(0),
            }),
            settle_delay,
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn is_restoring(&self) -> bool {
        self.inner.started.load(Ordering::Acquire) > self.inner.released.load(Ordering::Acquire)
    }

    /// Close the gate. Must happen before the clipboard is overwritten.
    pub fn begin(&self) -> u64 {
        self.inner.started.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Release `generation` right away, e.g. when nothing was written.
    pub fn release(&self, generation: u64) {
        self.inner.released.fetch_max(generation, Ordering::AcqRel);
    }

    /// Release `generation` once the settle delay has elapsed.
    pub fn release_after_settle(&self, generation: u64) {
        let gate = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(gate.settle_delay).await;
            gate.release(generation);
            debug!(generation, restoring = gate.is_restoring(), "restore settle delay elapsed");
        });
    }
}
