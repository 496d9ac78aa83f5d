//! System clipboard adapters.

pub mod change_count;
mod in_memory;
mod rs_clipboard;
pub mod watcher;

pub use in_memory::InMemoryClipboard;
pub use rs_clipboard::RsClipboard;
pub use watcher::ChangeWatcher;
