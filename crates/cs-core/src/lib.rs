//! # cs-core
//!
//! Core domain models and business logic for ClipShelf.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the clipboard data model, the content classifier, the history ordering policy,
//! configuration and the ports implemented by `cs-infra` and `cs-platform`.

pub mod app_dirs;
pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod history;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use classifier::{Classification, ContentClassifier};
pub use clipboard::{
    Category, ClipboardItem, ContentHash, Representation, RepresentationInfo,
};
pub use config::{AppConfig, HistoryConfig};
pub use ids::ItemId;
