use serde::{Deserialize, Serialize};

/// One encoding of a captured clipboard snapshot.
///
/// A single copy usually yields several of these (e.g. plain text plus HTML of the
/// same selection). Immutable once captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Representation {
    /// Platform type-identifier (UTI, MIME type or X11 target name).
    pub type_id: String,
    pub bytes: Vec<u8>,
}

impl Representation {
    pub fn new(type_id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            type_id: type_id.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn info(&self) -> RepresentationInfo {
        RepresentationInfo {
            type_id: self.type_id.clone(),
            size: self.size_bytes(),
        }
    }
}

/// What was stored for a representation, without the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentationInfo {
    pub type_id: String,
    pub size: u64,
}

/// Sum of all representation sizes of a snapshot.
pub fn total_size(representations: &[Representation]) -> u64 {
    representations.iter().map(Representation::size_bytes).sum()
}
