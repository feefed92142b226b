//! Tier attribution and deterministic tier buffer assembly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::loader::LoadedFile;
use super::types::{MemoryFileRecord, Tier, TierBuffers};

/// Candidate paths tagged with the tier that discovered them.
///
/// A path discovered by several tiers keeps the highest-priority one.
#[derive(Debug, Clone, Default)]
pub struct TierCandidates {
    tiers: BTreeMap<PathBuf, Tier>,
}

impl TierCandidates {
    /// Create an empty candidate set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a path with a tier, keeping the higher-priority tag on conflict.
    pub fn insert(&mut self, path: PathBuf, tier: Tier) {
        self.tiers
            .entry(path)
            .and_modify(|existing| *existing = (*existing).min(tier))
            .or_insert(tier);
    }

    /// Tag every path with the same tier.
    pub fn extend(&mut self, tier: Tier, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            self.insert(path, tier);
        }
    }

    /// Tier a path was attributed to.
    #[must_use]
    pub fn tier_of(&self, path: &Path) -> Option<Tier> {
        self.tiers.get(path).copied()
    }

    /// Unique candidate paths in sorted order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.tiers.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// A successfully read memory file with its tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedFile {
    pub record: MemoryFileRecord,
    pub content: String,
}

impl CategorizedFile {
    /// Build from a path, tier and content.
    #[must_use]
    pub fn new(path: PathBuf, tier: Tier, content: String) -> Self {
        Self {
            record: MemoryFileRecord {
                path,
                tier,
                char_count: content.chars().count(),
            },
            content,
        }
    }
}

/// Number of components in a path; parents sort before their children.
#[must_use]
pub fn path_depth(path: &Path) -> usize {
    path.components().count()
}

/// Sort files by directory depth ascending, then path ascending.
pub fn sort_files(files: &mut [&CategorizedFile]) {
    files.sort_by(|a, b| {
        path_depth(&a.record.path)
            .cmp(&path_depth(&b.record.path))
            .then_with(|| a.record.path.cmp(&b.record.path))
    });
}

/// Assigns tiers and renders tier buffers with provenance headers.
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    /// Paths under this directory are shown relative to it.
    display_root: Option<PathBuf>,
}

impl Categorizer {
    /// Create a categorizer that renders paths relative to `display_root`.
    #[must_use]
    pub fn new(display_root: Option<PathBuf>) -> Self {
        Self { display_root }
    }

    /// Attach tiers to successfully read files.
    ///
    /// Files with absent content, or that no tier discovered, are dropped.
    #[must_use]
    pub fn categorize(
        &self,
        loaded: Vec<LoadedFile>,
        candidates: &TierCandidates,
    ) -> Vec<CategorizedFile> {
        loaded
            .into_iter()
            .filter_map(|file| {
                let content = file.content?;
                let Some(tier) = candidates.tier_of(&file.path) else {
                    tracing::warn!(path = %file.path.display(), "Loaded file has no tier");
                    return None;
                };
                Some(CategorizedFile::new(file.path, tier, content))
            })
            .collect()
    }

    /// Build all three tier buffers.
    #[must_use]
    pub fn build_buffers(&self, files: &[CategorizedFile]) -> TierBuffers {
        let mut buffers = TierBuffers::default();
        for tier in Tier::ALL {
            *buffers.get_mut(tier) =
                self.concatenate(files.iter().filter(|f| f.record.tier == tier));
        }
        buffers
    }

    /// Concatenate files in depth-then-path order with provenance headers.
    #[must_use]
    pub fn concatenate<'a>(&self, files: impl IntoIterator<Item = &'a CategorizedFile>) -> String {
        let mut ordered: Vec<_> = files.into_iter().collect();
        sort_files(&mut ordered);

        ordered
            .into_iter()
            .filter_map(|file| {
                let trimmed = file.content.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let shown = self.display_path(&file.record.path);
                Some(format!(
                    "--- Context from: {shown} ---\n{trimmed}\n--- End of Context from: {shown} ---"
                ))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render a path for a provenance header.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        self.display_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .filter(|relative| !relative.as_os_str().is_empty())
            .unwrap_or(path)
            .display()
            .to_string()
    }
}
