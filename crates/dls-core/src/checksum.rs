//! Simulated checksum for verified downloads.
//!
//! No bytes are actually transferred, so there is no content to hash. The
//! digest is computed over the download identifier instead: deterministic,
//! stable across restarts, and obviously not a content checksum.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// SHA-256 of the download identifier as lowercase hex.
pub fn simulated_digest(id: Uuid) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
