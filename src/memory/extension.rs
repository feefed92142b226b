//! Extension registry seam for the extension memory tier.

use std::path::PathBuf;

use async_trait::async_trait;

use super::error::MemoryError;
use crate::config::ExtensionConfig;

/// Source of context files contributed by installed extensions.
#[async_trait]
pub trait ExtensionRegistry: Send + Sync {
    /// List context files of every active extension.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the caller degrades the extension tier to
    /// empty without affecting other tiers.
    async fn context_files(&self) -> Result<Vec<PathBuf>, MemoryError>;
}

/// Registry backed by the `[[extensions]]` configuration table.
#[derive(Debug, Clone, Default)]
pub struct ConfigExtensionRegistry {
    extensions: Vec<ExtensionConfig>,
}

impl ConfigExtensionRegistry {
    /// Create a registry from configured extensions.
    #[must_use]
    pub fn new(extensions: Vec<ExtensionConfig>) -> Self {
        Self { extensions }
    }
}

#[async_trait]
impl ExtensionRegistry for ConfigExtensionRegistry {
    async fn context_files(&self) -> Result<Vec<PathBuf>, MemoryError> {
        let files = self
            .extensions
            .iter()
            .filter(|ext| ext.active)
            .flat_map(|ext| {
                ext.context_files.iter().map(move |file| {
                    if file.is_absolute() {
                        file.clone()
                    } else {
                        ext.path.join(file)
                    }
                })
            })
            .collect();
        Ok(files)
    }
}
