//! # cs-platform
//!
//! Platform-specific implementations for ClipShelf.
//!
//! This crate contains the adapters that talk to the operating system: the
//! shared clipboard and the per-user application directories.

pub mod app_dirs;
pub mod clipboard;

pub use app_dirs::{AppDirsError, DirsAppDirsAdapter};
pub use clipboard::{InMemoryClipboard, RsClipboard};
