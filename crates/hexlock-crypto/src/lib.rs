//! hexlock-crypto: the three leaf components of the transition engine
//!
//! Sealed buffer format (binary, before armoring):
//! ```text
//! [12 bytes: random nonce][N bytes: ciphertext][16 bytes: GCM tag]
//! ```
//!
//! On-disk armor format (`.enc` files): lowercase hex of the sealed buffer,
//! broken into 64-character lines so the artifact stays diff-friendly under
//! version control.
//!
//! Digest sidecars (`.sha256` files): 64 lowercase hex characters, the
//! SHA-256 of the plaintext at the moment it was last locked. Change
//! detection only; tamper detection is the GCM tag's job.

pub mod aead;
pub mod armor;
pub mod digest;
pub mod key;

pub use aead::{open, seal};
pub use armor::{decode, encode};
pub use digest::{digest_hex, digests_match};
pub use key::SealKey;

/// Size of a key in bytes (256-bit)
pub const KEY_SIZE: usize = 32;

/// Size of an AES-GCM nonce (96-bit)
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag
pub const TAG_SIZE: usize = 16;
