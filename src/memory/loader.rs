//! Concurrent memory file reader.

use std::path::{Path, PathBuf};

use futures_util::future::join_all;

use super::error::MemoryError;

/// Result of reading one memory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    /// File content, or `None` if the read failed.
    pub content: Option<String>,
}

/// Reads memory files, treating failures as absent content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentLoader;

impl ContentLoader {
    /// Create a new loader.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read a single file.
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::Read` if the file is missing, unreadable, or not
    /// valid UTF-8.
    pub async fn read(&self, path: &Path) -> Result<String, MemoryError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| MemoryError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Read every path concurrently.
    ///
    /// Output order matches input order. Failed reads are logged and yield
    /// `content: None`; they never abort the batch.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Vec<LoadedFile> {
        let reads = paths.iter().map(|path| async move {
            let content = match self.read(path).await {
                Ok(content) => Some(content),
                Err(MemoryError::Read { source, .. })
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    tracing::debug!(path = %path.display(), "Memory file not found");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable memory file");
                    None
                }
            };
            LoadedFile {
                path: path.clone(),
                content,
            }
        });

        join_all(reads).await
    }
}
