use sha2::{Digest, Sha256};

use cs_core::ports::ContentHashPort;
use cs_core::{ContentHash, Representation};

/// SHA-256 over the representation bytes, fed in capture order.
pub struct Sha256Hasher;

impl ContentHashPort for Sha256Hasher {
    fn hash_representations(&self, representations: &[Representation]) -> ContentHash {
        let mut hasher = Sha256::new();
        for rep in representations {
            hasher.update(&rep.bytes);
        }
        ContentHash(hasher.finalize().into())
    }
}
