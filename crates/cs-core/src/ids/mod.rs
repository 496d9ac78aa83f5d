//! ID type wrappers for type safety.

mod id_macro;
pub mod item_id;

pub use id_macro::InvalidId;
pub use item_id::ItemId;
