//! AES-256-GCM seal/open with a random nonce prefixed to the ciphertext
//!
//! Every `seal` call draws a fresh 96-bit nonce from the OS CSPRNG; nonces
//! are never derived or counted, so reuse under one key cannot happen by
//! construction. No associated data is used.

use aes_gcm::{aead::Aead, Aes256Gcm, KeyInit, Nonce};
use hexlock_core::{HexlockError, HexlockResult};
use rand::RngCore;

use crate::key::SealKey;
use crate::NONCE_SIZE;

/// Encrypt a plaintext buffer.
///
/// Returns `[12-byte nonce][ciphertext][16-byte tag]`.
pub fn seal(key: &SealKey, plaintext: &[u8]) -> HexlockResult<Vec<u8>> {
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| HexlockError::Cipher(format!("encryption failed: {e}")))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a sealed buffer produced by [`seal`].
///
/// Fails with `InputTooShort` when the buffer cannot even hold a nonce,
/// and with `Authentication` when the GCM tag does not verify (wrong key,
/// or corrupted/tampered ciphertext).
pub fn open(key: &SealKey, sealed: &[u8]) -> HexlockResult<Vec<u8>> {
    if sealed.len() < NONCE_SIZE {
        return Err(HexlockError::InputTooShort {
            len: sealed.len(),
            min: NONCE_SIZE,
        });
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm::new(key.as_bytes().into());

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| HexlockError::Authentication)
}
