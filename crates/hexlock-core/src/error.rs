use std::path::PathBuf;

use thiserror::Error;

pub type HexlockResult<T> = Result<T, HexlockError>;

/// Everything that can go wrong while locking or unlocking a file.
///
/// Nothing here is fatal to the process: the engine reports one of these
/// per file and moves on to the next. Exit-code decisions belong to the
/// boundary layer.
#[derive(Debug, Error)]
pub enum HexlockError {
    #[error("source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("digest sidecar not found: {0}")]
    SidecarNotFound(PathBuf),

    #[error("key must be {expected} bytes of hex, got {got}")]
    InvalidKey { expected: usize, got: usize },

    #[error("authentication failed: wrong key or corrupted ciphertext")]
    Authentication,

    #[error("sealed input too short: {len} bytes, need at least {min}")]
    InputTooShort { len: usize, min: usize },

    #[error("malformed armor text: {0}")]
    MalformedEncoding(String),

    #[error(
        "{path}: decrypted content does not match the digest sidecar, \
         refusing to overwrite; use --force to override"
    )]
    LockedContentMismatch { path: PathBuf },

    #[error("cipher failure: {0}")]
    Cipher(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
