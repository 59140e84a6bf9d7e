//! The shared 256-bit key: generation, hex transport, zeroize on drop

use hexlock_core::{HexlockError, HexlockResult};
use rand::RngCore;
use zeroize::Zeroize;

use crate::KEY_SIZE;

/// The single shared symmetric key guarding every locked file.
///
/// Held only in memory, never persisted by the core. Travels as a
/// 64-character lowercase hex string.
#[derive(Clone)]
pub struct SealKey {
    bytes: [u8; KEY_SIZE],
}

impl SealKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parse a 64-character hex string into a key.
    ///
    /// Fails with `InvalidKey` before any data is touched, so a bad key
    /// never gets as far as the cipher.
    pub fn from_hex(s: &str) -> HexlockResult<Self> {
        let raw = hex::decode(s.trim()).map_err(|_| HexlockError::InvalidKey {
            expected: KEY_SIZE,
            got: s.trim().len() / 2,
        })?;
        let bytes: [u8; KEY_SIZE] =
            raw.try_into().map_err(|v: Vec<u8>| HexlockError::InvalidKey {
                expected: KEY_SIZE,
                got: v.len(),
            })?;
        Ok(Self { bytes })
    }

    /// Generate a fresh random key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Render as lowercase hex for the operator to save.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for SealKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SealKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
