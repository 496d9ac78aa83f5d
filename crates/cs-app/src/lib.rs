//! # cs-app
//!
//! Application layer for ClipShelf: the history engine that owns the ordered
//! history, the change detector that drives capture, and the facade the
//! presentation layer calls into.

pub mod facade;
pub mod history_engine;
pub mod restore_gate;
pub mod usecases;
pub mod watcher;

pub use facade::{ClipShelf, PauseSwitch};
pub use history_engine::{HistoryEngine, InsertOutcome, RestoreOutcome};
pub use restore_gate::RestoreGate;
pub use watcher::{ChangeDetector, TickOutcome};
