use std::path::PathBuf;

use crate::error::HexlockResult;

/// Which direction a transition pass runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Lock,
    Unlock,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Lock => "lock",
            Operation::Unlock => "unlock",
        }
    }
}

/// Successful result of one transition on one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fresh lock: plaintext sealed, both sidecars written, source removed.
    Locked { enc: PathBuf, digest: PathBuf },
    /// Plaintext digest matched the existing sidecar; nothing re-encrypted,
    /// the redundant plaintext was removed (unless dry-run).
    LockedUnchanged,
    /// Plaintext restored from the encrypted pair; sidecars left in place.
    Unlocked { restored: PathBuf },
}

/// Per-file report from a batch pass. A failure on one path never aborts
/// the batch, so the caller always gets one report per input path.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: HexlockResult<Outcome>,
}
