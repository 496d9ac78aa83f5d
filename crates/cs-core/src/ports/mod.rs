//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations, so the capture pipeline stays
//! independent of the OS clipboard and of the on-disk layout.

mod clipboard;
mod clock;
pub mod errors;
mod hash;
mod history_store;
mod thumbnail;

pub use clipboard::SystemClipboardPort;
pub use clock::ClockPort;
pub use errors::ClipboardAccessError;
pub use hash::ContentHashPort;
pub use history_store::{HistoryStorePort, MigrationOutcome};
pub use thumbnail::{GeneratedThumbnail, ThumbnailGeneratorPort};
