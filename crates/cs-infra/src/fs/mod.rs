//! Filesystem persistence for clipboard history.

mod atomic;
mod blobs;
mod error;
mod history_store;
mod index;
mod layout;
mod legacy;

pub use atomic::write_atomic;
pub use blobs::{BlobDescriptor, BlobEntry};
pub use error::StoreError;
pub use history_store::FsHistoryStore;
pub use index::{IndexFile, IndexRecord, INDEX_VERSION};
pub use layout::StoreLayout;
