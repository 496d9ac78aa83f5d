use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of one captured clipboard item.
///
/// Assigned at capture time and never reused; doubles as the name of the
/// item's blob directory on disk. Deserialization goes through
/// [`ItemId::parse`], so a stored id can never name a path outside that directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl_id!(ItemId);
