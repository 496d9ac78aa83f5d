use crate::clipboard::{ContentHash, Representation};

pub trait ContentHashPort: Send + Sync {
    /// Digest over the raw bytes of every representation, concatenated in capture order.
    fn hash_representations(&self, representations: &[Representation]) -> ContentHash;
}
