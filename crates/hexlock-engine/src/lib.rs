//! hexlock-engine: the lock/unlock transition engine
//!
//! One synchronous transition per file path. Lock turns a plaintext file
//! into a `P.enc` + `P.sha256` sidecar pair and removes the plaintext;
//! Unlock restores the plaintext and leaves the pair in place. Batch
//! passes run file by file with no parallelism and no shared state; a
//! failure on one path never aborts the rest.

pub mod transition;

pub use transition::{
    enc_path, digest_path, lock_file, run_pass, unlock_file, TransitionOptions,
};
