use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file schema (loaded from hexlock.toml).
///
/// `files` lists the paths guarded by lock/unlock passes. Positional CLI
/// arguments are concatenated after these; nothing is deduplicated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HexlockConfig {
    pub files: Vec<PathBuf>,
}
