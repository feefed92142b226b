//! Memory loading error types.

use std::path::PathBuf;

use super::types::Tier;

/// Errors that can occur while discovering or reading memory files.
///
/// None of these abort a refresh: read failures become absent content and
/// discovery failures empty that tier only.
#[derive(thiserror::Error, Debug)]
pub enum MemoryError {
    /// A memory file could not be read.
    #[error("Failed to read memory file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Candidate discovery failed for one tier.
    #[error("Discovery failed for {tier} tier: {message}")]
    Discovery { tier: Tier, message: String },

    /// The extension registry could not list context files.
    #[error("Extension registry error: {0}")]
    Extension(String),
}
