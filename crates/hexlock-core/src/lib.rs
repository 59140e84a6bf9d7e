//! hexlock-core: shared types for the hexlock workspace
//!
//! Holds the pieces every other crate agrees on: the error taxonomy,
//! the config file schema, and the per-file transition outcomes the
//! engine reports back to the boundary layer.

pub mod config;
pub mod error;
pub mod outcome;

pub use config::HexlockConfig;
pub use error::{HexlockError, HexlockResult};
pub use outcome::{FileReport, Operation, Outcome};
