//! SHA-256 content digests for change detection
//!
//! The digest is a fingerprint of the plaintext at the moment it was
//! locked, stored in the `.sha256` sidecar. It detects whether a plaintext
//! changed since the last lock; it is not a defense against ciphertext
//! tampering (the GCM tag covers that).

use sha2::{Digest, Sha256};

/// SHA-256 of a byte buffer as 64 lowercase hex characters.
pub fn digest_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Byte-exact comparison of two hex digests.
///
/// Deliberately strict: a sidecar hand-edited to gain a trailing newline
/// compares as different, which reads as "content changed".
pub fn digests_match(a: &str, b: &str) -> bool {
    a.as_bytes() == b.as_bytes()
}
