//! System clipboard port - abstracts the OS pasteboard.

use anyhow::Result;

use crate::clipboard::Representation;

/// Platform-agnostic access to the shared system clipboard.
///
/// Implementations must be cheap to call from the polling loop: `change_count`
/// is read on every tick, the other reads only after a change was observed.
pub trait SystemClipboardPort: Send + Sync {
    /// Monotonically increasing counter, bumped by every clipboard write.
    fn change_count(&self) -> Result<i64>;

    /// Type-identifiers currently offered, in the order the owner published them.
    fn available_types(&self) -> Result<Vec<String>>;

    /// Raw bytes for one type, `None` if the owner no longer provides it.
    fn read(&self, type_id: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the clipboard content with the given representations.
    fn write(&self, representations: &[Representation]) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
