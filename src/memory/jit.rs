//! Just-in-time memory discovery by upward directory traversal.

use std::path::{Component, Path, PathBuf};

use super::categorize::CategorizedFile;
use super::loader::ContentLoader;
use super::types::{LoadedPathSet, Tier};

/// Make a path absolute and fold `.` and `..` components without touching
/// the filesystem.
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Walks from an accessed file toward its trusted root, loading memory files
/// that have not been delivered yet.
#[derive(Debug, Clone)]
pub struct JitTraverser {
    filenames: Vec<String>,
    max_hops: usize,
    loader: ContentLoader,
}

impl JitTraverser {
    /// Create a traverser for the given memory file names and hop ceiling.
    #[must_use]
    pub fn new(filenames: Vec<String>, max_hops: usize) -> Self {
        Self {
            filenames,
            max_hops,
            loader: ContentLoader::new(),
        }
    }

    /// The deepest trusted root containing `dir`, if any.
    #[must_use]
    pub fn nearest_root(dir: &Path, trusted_roots: &[PathBuf]) -> Option<PathBuf> {
        trusted_roots
            .iter()
            .map(|root| normalize_path(root))
            .filter(|root| dir.starts_with(root))
            .max_by_key(|root| root.components().count())
    }

    /// Directories visited for `accessed_path`, deepest first.
    ///
    /// Starts at the directory containing the path and stops after the
    /// nearest trusted root, at the filesystem root, or after `max_hops`
    /// directories. Paths outside every trusted root yield no directories.
    #[must_use]
    pub fn plan(&self, accessed_path: &Path, trusted_roots: &[PathBuf]) -> Vec<PathBuf> {
        let accessed = normalize_path(accessed_path);
        let Some(start) = accessed.parent() else {
            return Vec::new();
        };
        let Some(root) = Self::nearest_root(start, trusted_roots) else {
            tracing::debug!(
                path = %accessed.display(),
                "Accessed path is outside every trusted root"
            );
            return Vec::new();
        };

        let mut dirs = Vec::new();
        let mut current = Some(start);
        while let Some(dir) = current {
            if dirs.len() >= self.max_hops {
                tracing::debug!(max_hops = self.max_hops, "Traversal hop limit reached");
                break;
            }
            dirs.push(dir.to_path_buf());
            if dir == root.as_path() {
                break;
            }
            current = dir.parent();
        }
        dirs
    }

    /// Walk upward from `accessed_path`, reading memory files not yet in
    /// `loaded`.
    ///
    /// Successfully read files are inserted into `loaded` and returned; failed
    /// reads are skipped and stay eligible for a later call.
    pub async fn traverse(
        &self,
        accessed_path: &Path,
        trusted_roots: &[PathBuf],
        loaded: &mut LoadedPathSet,
    ) -> Vec<CategorizedFile> {
        let mut found = Vec::new();

        for dir in self.plan(accessed_path, trusted_roots) {
            let candidates: Vec<PathBuf> = self
                .filenames
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| !loaded.contains(path))
                .collect();
            if candidates.is_empty() {
                continue;
            }

            for file in self.loader.read_all(&candidates).await {
                let Some(content) = file.content else {
                    continue;
                };
                tracing::debug!(path = %file.path.display(), "Loaded memory file just in time");
                loaded.insert(file.path.clone());
                found.push(CategorizedFile::new(file.path, Tier::Project, content));
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_dots() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c/file.ts")),
            PathBuf::from("/a/c/file.ts")
        );
        assert_eq!(normalize_path(Path::new("/../..")), PathBuf::from("/"));
    }

    #[test]
    fn test_normalize_relative_is_absolute() {
        assert!(normalize_path(Path::new("src/lib.rs")).is_absolute());
    }

    #[test]
    fn test_plan_halts_at_trusted_root() {
        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 32);
        let dirs = traverser.plan(
            Path::new("/home/u/A/sub1/sub2/file.ts"),
            &[PathBuf::from("/home/u/A")],
        );

        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/home/u/A/sub1/sub2"),
                PathBuf::from("/home/u/A/sub1"),
                PathBuf::from("/home/u/A"),
            ]
        );
    }

    #[test]
    fn test_plan_uses_nearest_root() {
        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 32);
        let dirs = traverser.plan(
            Path::new("/ws/pkg/src/main.rs"),
            &[PathBuf::from("/ws"), PathBuf::from("/ws/pkg")],
        );

        assert_eq!(
            dirs,
            vec![PathBuf::from("/ws/pkg/src"), PathBuf::from("/ws/pkg")]
        );
    }

    #[test]
    fn test_plan_outside_roots_is_empty() {
        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 32);
        let dirs = traverser.plan(Path::new("/etc/passwd"), &[PathBuf::from("/ws")]);
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_root_prefix_must_match_whole_components() {
        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 32);
        let dirs = traverser.plan(Path::new("/ws-other/file.ts"), &[PathBuf::from("/ws")]);
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_plan_respects_hop_ceiling() {
        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 2);
        let dirs = traverser.plan(Path::new("/r/a/b/c/d/file.ts"), &[PathBuf::from("/")]);
        assert_eq!(
            dirs,
            vec![PathBuf::from("/r/a/b/c/d"), PathBuf::from("/r/a/b/c")]
        );
    }

    #[test]
    fn test_plan_with_filesystem_root_as_trusted_root() {
        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 32);
        let dirs = traverser.plan(Path::new("/a/file.ts"), &[PathBuf::from("/")]);
        assert_eq!(dirs, vec![PathBuf::from("/a"), PathBuf::from("/")]);
    }

    #[tokio::test]
    async fn test_traverse_skips_loaded_paths() {
        let ws = tempfile::tempdir().unwrap();
        let root = normalize_path(ws.path());
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("CLAUDE.md"), "root").unwrap();
        std::fs::write(root.join("sub/CLAUDE.md"), "sub").unwrap();

        let traverser = JitTraverser::new(vec!["CLAUDE.md".to_string()], 32);
        let mut loaded = LoadedPathSet::new();
        loaded.insert(root.join("CLAUDE.md"));

        let found = traverser
            .traverse(&root.join("sub/file.rs"), &[root.clone()], &mut loaded)
            .await;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].record.path, root.join("sub/CLAUDE.md"));
        assert_eq!(found[0].record.tier, Tier::Project);
        assert_eq!(loaded.len(), 2);

        let again = traverser
            .traverse(&root.join("sub/file.rs"), &[root.clone()], &mut loaded)
            .await;
        assert!(again.is_empty());
        assert_eq!(loaded.len(), 2);
    }
}
