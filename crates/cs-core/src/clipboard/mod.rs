//! Clipboard domain models.

mod category;
pub mod content_type;
mod hash;
mod item;
mod representation;

pub use category::{Category, UnknownCategory};
pub use content_type::ContentKind;
pub use hash::ContentHash;
pub use item::{ClipboardItem, MAX_PREVIEW_UTF16_UNITS};
pub use representation::{total_size, Representation, RepresentationInfo};
