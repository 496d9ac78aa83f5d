//! # cs-infra
//!
//! Infrastructure adapters for ClipShelf: the filesystem history store, the
//! content hasher, the thumbnail generator, the config loader and the clock.

pub mod clipboard;
pub mod config;
pub mod fs;
pub mod hashing;
pub mod time;

pub use clipboard::InfraThumbnailGenerator;
pub use config::load_config;
pub use fs::FsHistoryStore;
pub use hashing::Sha256Hasher;
pub use time::SystemClock;
