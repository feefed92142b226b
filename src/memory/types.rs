//! Shared data model for tiered memory loading.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Scope level of a memory file.
///
/// Variants are declared in priority order, so `Ord` sorts the
/// highest-priority tier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// User-wide memory (e.g. `~/.claude/CLAUDE.md`).
    Global,
    /// Context files contributed by active extensions.
    Extension,
    /// Files found in the workspace, eagerly or just-in-time.
    Project,
}

impl Tier {
    /// All tiers in priority order.
    pub const ALL: [Tier; 3] = [Tier::Global, Tier::Extension, Tier::Project];

    /// Lowercase name used in logs and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Global => "global",
            Tier::Extension => "extension",
            Tier::Project => "project",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A memory file that was read successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryFileRecord {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Tier the file was attributed to.
    pub tier: Tier,
    /// Number of characters in the file content.
    pub char_count: usize,
}

/// Set of memory files whose content has been delivered this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedPathSet {
    paths: HashSet<PathBuf>,
}

impl LoadedPathSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path as loaded. Returns `false` if it was already present.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.paths.insert(path)
    }

    /// Check whether a path has already been loaded.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Forget every loaded path.
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Number of loaded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if nothing has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Loaded paths in sorted order.
    #[must_use]
    pub fn sorted(&self) -> Vec<PathBuf> {
        let mut paths: Vec<_> = self.paths.iter().cloned().collect();
        paths.sort();
        paths
    }
}

/// Concatenated content of each tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBuffers {
    pub global: String,
    pub extension: String,
    pub project: String,
}

impl TierBuffers {
    /// Get the buffer for a tier.
    #[must_use]
    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::Global => &self.global,
            Tier::Extension => &self.extension,
            Tier::Project => &self.project,
        }
    }

    /// Get a mutable buffer for a tier.
    pub fn get_mut(&mut self, tier: Tier) -> &mut String {
        match tier {
            Tier::Global => &mut self.global,
            Tier::Extension => &mut self.extension,
            Tier::Project => &mut self.project,
        }
    }
}

/// Per-tier file and character counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStats {
    pub files: usize,
    pub chars: usize,
}

/// Aggregate counts over the current file records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub global: TierStats,
    pub extension: TierStats,
    pub project: TierStats,
    pub total_files: usize,
    pub total_chars: usize,
}

impl MemoryStats {
    /// Compute stats from a list of records.
    #[must_use]
    pub fn from_records(records: &[MemoryFileRecord]) -> Self {
        let mut stats = Self::default();
        for record in records {
            let tier = match record.tier {
                Tier::Global => &mut stats.global,
                Tier::Extension => &mut stats.extension,
                Tier::Project => &mut stats.project,
            };
            tier.files += 1;
            tier.chars += record.char_count;
            stats.total_files += 1;
            stats.total_chars += record.char_count;
        }
        stats
    }
}

/// Notification published by the memory manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MemoryEvent {
    /// A refresh completed; carries the number of loaded files.
    Changed { file_count: usize },
}

/// Outcome of a full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub file_count: usize,
    pub stats: MemoryStats,
}

/// Content newly loaded by a just-in-time discovery call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredContext {
    /// Concatenated content with provenance headers. Empty if nothing new.
    pub content: String,
    /// Files loaded by this call, in output order.
    pub files: Vec<PathBuf>,
}

impl DiscoveredContext {
    /// Check if the call loaded nothing new.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_priority_order() {
        assert!(Tier::Global < Tier::Extension);
        assert!(Tier::Extension < Tier::Project);
        assert_eq!(Tier::Global.min(Tier::Project), Tier::Global);
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&Tier::Extension).unwrap();
        assert_eq!(json, "\"extension\"");
        assert_eq!(Tier::Project.to_string(), "project");
    }

    #[test]
    fn test_loaded_path_set_insert_once() {
        let mut set = LoadedPathSet::new();
        assert!(set.insert(PathBuf::from("/a/CLAUDE.md")));
        assert!(!set.insert(PathBuf::from("/a/CLAUDE.md")));
        assert_eq!(set.len(), 1);
        assert!(set.contains(Path::new("/a/CLAUDE.md")));

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_stats_from_records() {
        let records = vec![
            MemoryFileRecord {
                path: PathBuf::from("/home/u/.claude/CLAUDE.md"),
                tier: Tier::Global,
                char_count: 10,
            },
            MemoryFileRecord {
                path: PathBuf::from("/ws/CLAUDE.md"),
                tier: Tier::Project,
                char_count: 5,
            },
            MemoryFileRecord {
                path: PathBuf::from("/ws/sub/CLAUDE.md"),
                tier: Tier::Project,
                char_count: 7,
            },
        ];

        let stats = MemoryStats::from_records(&records);
        assert_eq!(stats.global, TierStats { files: 1, chars: 10 });
        assert_eq!(stats.extension, TierStats::default());
        assert_eq!(stats.project, TierStats { files: 2, chars: 12 });
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_chars, 22);
    }

    #[test]
    fn test_memory_event_serialization() {
        let event = MemoryEvent::Changed { file_count: 3 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"changed","file_count":3}"#);
    }
}
