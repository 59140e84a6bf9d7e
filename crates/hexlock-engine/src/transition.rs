//! Per-file lock/unlock transitions and the batch pass over many files

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use hexlock_core::{FileReport, HexlockError, HexlockResult, Operation, Outcome};
use hexlock_crypto::{armor, digest_hex, digests_match, open, seal, SealKey};

/// Extension of the armored ciphertext sidecar.
pub const ENC_EXTENSION: &str = ".enc";

/// Extension of the content digest sidecar.
pub const DIGEST_EXTENSION: &str = ".sha256";

/// Knobs shared by both transition directions.
///
/// `check_hash` is the inverse of the user-facing `--force` flag: force
/// disables the digest gate and trades safety for unconditional overwrite.
#[derive(Debug, Clone, Copy)]
pub struct TransitionOptions {
    pub dry_run: bool,
    pub check_hash: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            check_hash: true,
        }
    }
}

/// `P` -> `P.enc` (appended, not a replaced extension: `a.txt` -> `a.txt.enc`).
pub fn enc_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(ENC_EXTENSION);
    PathBuf::from(os)
}

/// `P` -> `P.sha256`.
pub fn digest_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(DIGEST_EXTENSION);
    PathBuf::from(os)
}

/// Lock one file: seal the plaintext, write the `.enc`/`.sha256` pair,
/// remove the plaintext.
///
/// With `check_hash` on and an up-to-date `.sha256` sidecar already
/// present, the file is unchanged since its last lock: nothing is
/// re-encrypted (no new nonce, sidecars untouched) and only the redundant
/// plaintext is removed. That cheaper outcome is reported as
/// [`Outcome::LockedUnchanged`].
///
/// The plaintext is deleted only after both sidecar writes succeeded; a
/// failed deletion leaves both forms on disk, which is recoverable, not
/// data loss.
pub fn lock_file(path: &Path, key: &SealKey, opts: TransitionOptions) -> HexlockResult<Outcome> {
    let plaintext = read_source(path)?;
    let digest_now = digest_hex(&plaintext);
    let digest_file = digest_path(path);

    if opts.check_hash {
        // Absence or unreadability of the sidecar is not an error here:
        // it just means "first lock, proceed".
        if let Ok(stored) = fs::read_to_string(&digest_file) {
            if digests_match(&stored, &digest_now) {
                debug!(path = %path.display(), "digest matches sidecar, skipping re-encryption");
                if !opts.dry_run {
                    fs::remove_file(path)?;
                }
                return Ok(Outcome::LockedUnchanged);
            }
        }
    }

    let sealed = seal(key, &plaintext)?;
    let armored = armor::encode(&sealed);

    let enc_file = enc_path(path);
    if opts.dry_run {
        return Ok(Outcome::Locked {
            enc: enc_file,
            digest: digest_file,
        });
    }

    write_restricted(&enc_file, armored.as_bytes())?;
    write_restricted(&digest_file, digest_now.as_bytes())?;

    // Only now is the plaintext redundant.
    fs::remove_file(path)?;

    Ok(Outcome::Locked {
        enc: enc_file,
        digest: digest_file,
    })
}

/// Unlock one file: decode and open `P.enc`, write the plaintext back to
/// `P`. The sidecar pair is left in place; unlock is non-destructive
/// toward the encrypted form.
///
/// With `check_hash` on, the digest of the just-decrypted plaintext is
/// compared against the `.sha256` sidecar. Note the asymmetry with lock:
/// this compares the pair against itself, so it catches a corrupted or
/// mismatched sidecar pair, but it cannot detect that a current on-disk
/// plaintext was edited after the last lock.
pub fn unlock_file(path: &Path, key: &SealKey, opts: TransitionOptions) -> HexlockResult<Outcome> {
    let enc_file = enc_path(path);
    let armored = match fs::read_to_string(&enc_file) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(HexlockError::SourceNotFound(enc_file));
        }
        Err(e) => return Err(e.into()),
    };

    let sealed = armor::decode(&armored)?;
    let plaintext = open(key, &sealed)?;

    if opts.check_hash {
        let digest_file = digest_path(path);
        let stored = match fs::read_to_string(&digest_file) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(HexlockError::SidecarNotFound(digest_file));
            }
            Err(e) => return Err(e.into()),
        };
        if !digests_match(&stored, &digest_hex(&plaintext)) {
            return Err(HexlockError::LockedContentMismatch {
                path: path.to_path_buf(),
            });
        }
    }

    if opts.dry_run {
        return Ok(Outcome::Unlocked {
            restored: path.to_path_buf(),
        });
    }

    write_restricted(path, &plaintext)?;

    Ok(Outcome::Unlocked {
        restored: path.to_path_buf(),
    })
}

/// Run one lock or unlock pass over a list of paths.
///
/// Files are processed in order, each one fully before the next. Every
/// path yields a report; a failure never aborts the batch.
pub fn run_pass(
    op: Operation,
    files: &[PathBuf],
    key: &SealKey,
    opts: TransitionOptions,
) -> Vec<FileReport> {
    files
        .iter()
        .map(|path| {
            let result = match op {
                Operation::Lock => lock_file(path, key, opts),
                Operation::Unlock => unlock_file(path, key, opts),
            };
            match &result {
                Ok(outcome) => {
                    info!(path = %path.display(), op = op.as_str(), ?outcome, "transition done");
                }
                Err(e) => {
                    warn!(path = %path.display(), op = op.as_str(), error = %e, "transition failed");
                }
            }
            FileReport {
                path: path.clone(),
                result,
            }
        })
        .collect()
}

fn read_source(path: &Path) -> HexlockResult<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(HexlockError::SourceNotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Write a file with owner-only permissions; both sidecars and restored
/// plaintexts hold sensitive material.
#[cfg(unix)]
fn write_restricted(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_restricted(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_paths_append_extensions() {
        let p = Path::new("config/credentials.json");
        assert_eq!(enc_path(p), PathBuf::from("config/credentials.json.enc"));
        assert_eq!(
            digest_path(p),
            PathBuf::from("config/credentials.json.sha256")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_restricted_write_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sidecar");
        write_restricted(&target, b"sensitive").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
