//! Memory file candidate discovery per tier.
//!
//! Discovery only enumerates paths that currently exist as regular files.
//! Reading them is left to [`ContentLoader`](super::ContentLoader).

use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use super::error::MemoryError;
use super::extension::ExtensionRegistry;
use super::jit::normalize_path;
use super::types::Tier;
use crate::config::MemorySettings;

/// Enumerates candidate memory files for each tier.
#[derive(Debug, Clone)]
pub struct PathDiscoverer {
    filenames: Vec<String>,
    global_dir: Option<PathBuf>,
    max_scan_dirs: usize,
    ignored_dirs: Vec<String>,
    max_hops: usize,
}

impl PathDiscoverer {
    /// Create a discoverer from memory settings.
    #[must_use]
    pub fn new(settings: &MemorySettings) -> Self {
        Self {
            filenames: settings.filenames.clone(),
            global_dir: settings.resolved_global_dir().map(|dir| normalize_path(&dir)),
            max_scan_dirs: settings.max_scan_dirs,
            ignored_dirs: settings.ignored_dirs.clone(),
            max_hops: settings.max_jit_hops,
        }
    }

    /// Global memory files (`<global_dir>/<filename>`).
    pub async fn global_paths(&self) -> Vec<PathBuf> {
        match &self.global_dir {
            Some(dir) => self.memory_files_in(dir).await,
            None => {
                tracing::debug!("No home directory, skipping global memory");
                Vec::new()
            }
        }
    }

    /// Context files listed by the extension registry that exist on disk.
    ///
    /// # Errors
    ///
    /// Returns `MemoryError::Discovery` for the extension tier when the
    /// registry cannot list its files.
    pub async fn extension_paths(
        &self,
        registry: &dyn ExtensionRegistry,
    ) -> Result<Vec<PathBuf>, MemoryError> {
        let listed = registry
            .context_files()
            .await
            .map_err(|e| MemoryError::Discovery {
                tier: Tier::Extension,
                message: e.to_string(),
            })?;

        let mut paths = Vec::new();
        for path in listed {
            let path = normalize_path(&path);
            if is_file(&path).await {
                paths.push(path);
            } else {
                tracing::debug!(path = %path.display(), "Extension context file missing");
            }
        }
        Ok(paths)
    }

    /// Project memory files for every workspace directory.
    ///
    /// Combines an upward scan to the enclosing repository root with a bounded
    /// breadth-first scan below each directory. Output is sorted and unique.
    pub async fn project_paths(&self, workspace_dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut found = BTreeSet::new();
        for dir in workspace_dirs {
            let dir = normalize_path(dir);
            found.extend(self.upward_paths(&dir).await);
            found.extend(self.downward_paths(&dir).await);
        }
        tracing::debug!(count = found.len(), "Discovered project memory files");
        found.into_iter().collect()
    }

    /// Memory files from `dir` up to the nearest directory containing `.git`.
    ///
    /// Without a repository root only `dir` itself is scanned.
    async fn upward_paths(&self, dir: &Path) -> Vec<PathBuf> {
        let scan_dirs = match self.find_repo_root(dir).await {
            Some(root) => dir
                .ancestors()
                .take_while(|ancestor| ancestor.starts_with(&root))
                .map(Path::to_path_buf)
                .collect(),
            None => vec![dir.to_path_buf()],
        };

        let mut paths = Vec::new();
        for scan_dir in scan_dirs {
            if self.global_dir.as_deref() == Some(scan_dir.as_path()) {
                continue;
            }
            paths.extend(self.memory_files_in(&scan_dir).await);
        }
        paths
    }

    async fn find_repo_root(&self, dir: &Path) -> Option<PathBuf> {
        for ancestor in dir.ancestors().take(self.max_hops) {
            if tokio::fs::metadata(ancestor.join(".git")).await.is_ok() {
                return Some(ancestor.to_path_buf());
            }
        }
        None
    }

    /// Breadth-first scan below `dir`, visiting at most `max_scan_dirs`
    /// directories in sorted order.
    async fn downward_paths(&self, dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        let mut queue = VecDeque::from([dir.to_path_buf()]);
        let mut visited = 0;

        while let Some(current) = queue.pop_front() {
            if visited >= self.max_scan_dirs {
                tracing::debug!(
                    limit = self.max_scan_dirs,
                    root = %dir.display(),
                    "Directory scan limit reached"
                );
                break;
            }
            visited += 1;

            paths.extend(self.memory_files_in(&current).await);
            queue.extend(self.child_dirs(&current).await);
        }
        paths
    }

    /// Subdirectories worth descending into, sorted by name.
    async fn child_dirs(&self, dir: &Path) -> Vec<PathBuf> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "Cannot list directory");
                return Vec::new();
            }
        };

        let mut children = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let Ok(file_type) = entry.file_type().await else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || self.ignored_dirs.iter().any(|ignored| *ignored == name) {
                continue;
            }
            children.push(entry.path());
        }
        children.sort();
        children
    }

    /// Existing memory files directly inside `dir`.
    pub async fn memory_files_in(&self, dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for name in &self.filenames {
            let candidate = dir.join(name);
            if is_file(&candidate).await {
                paths.push(candidate);
            }
        }
        paths
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ConfigExtensionRegistry;

    fn discoverer(global_dir: &Path) -> PathDiscoverer {
        PathDiscoverer::new(&MemorySettings {
            global_dir: Some(global_dir.to_path_buf()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_global_paths() {
        let home = tempfile::tempdir().unwrap();
        let discoverer = discoverer(home.path());
        assert!(discoverer.global_paths().await.is_empty());

        std::fs::write(home.path().join("CLAUDE.md"), "global").unwrap();
        assert_eq!(
            discoverer.global_paths().await,
            vec![home.path().join("CLAUDE.md")]
        );
    }

    #[tokio::test]
    async fn test_project_paths_scan_down_and_skip_ignored() {
        let home = tempfile::tempdir().unwrap();
        let ws = tempfile::tempdir().unwrap();
        let root = ws.path();
        std::fs::create_dir_all(root.join("src/api")).unwrap();
        std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        std::fs::create_dir_all(root.join(".hidden")).unwrap();
        std::fs::write(root.join("CLAUDE.md"), "root").unwrap();
        std::fs::write(root.join("src/api/CLAUDE.md"), "api").unwrap();
        std::fs::write(root.join("node_modules/pkg/CLAUDE.md"), "vendored").unwrap();
        std::fs::write(root.join(".hidden/CLAUDE.md"), "hidden").unwrap();

        let paths = discoverer(home.path())
            .project_paths(&[root.to_path_buf()])
            .await;

        let root = normalize_path(root);
        assert_eq!(
            paths,
            vec![root.join("CLAUDE.md"), root.join("src/api/CLAUDE.md")]
        );
    }

    #[tokio::test]
    async fn test_project_paths_scan_up_to_repo_root() {
        let home = tempfile::tempdir().unwrap();
        let ws = tempfile::tempdir().unwrap();
        let repo = ws.path().join("repo");
        let pkg = repo.join("packages/app");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        std::fs::write(ws.path().join("CLAUDE.md"), "outside repo").unwrap();
        std::fs::write(repo.join("CLAUDE.md"), "repo").unwrap();
        std::fs::write(pkg.join("CLAUDE.md"), "pkg").unwrap();

        let paths = discoverer(home.path()).project_paths(&[pkg.clone()]).await;

        let repo = normalize_path(&repo);
        assert!(paths.contains(&repo.join("CLAUDE.md")));
        assert!(paths.contains(&repo.join("packages/app/CLAUDE.md")));
        assert!(!paths.contains(&normalize_path(ws.path()).join("CLAUDE.md")));
    }

    #[tokio::test]
    async fn test_scan_limit_bounds_directories() {
        let home = tempfile::tempdir().unwrap();
        let ws = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            std::fs::create_dir_all(ws.path().join(name)).unwrap();
            std::fs::write(ws.path().join(name).join("CLAUDE.md"), name).unwrap();
        }

        let discoverer = PathDiscoverer::new(&MemorySettings {
            global_dir: Some(home.path().to_path_buf()),
            max_scan_dirs: 2,
            ..Default::default()
        });
        let paths = discoverer.project_paths(&[ws.path().to_path_buf()]).await;

        let root = normalize_path(ws.path());
        assert_eq!(paths, vec![root.join("a/CLAUDE.md")]);
    }

    #[tokio::test]
    async fn test_multiple_filenames() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(home.path().join("AGENTS.md"), "agents").unwrap();
        std::fs::write(home.path().join("CLAUDE.md"), "claude").unwrap();

        let discoverer = PathDiscoverer::new(&MemorySettings {
            filenames: vec!["CLAUDE.md".to_string(), "AGENTS.md".to_string()],
            global_dir: Some(home.path().to_path_buf()),
            ..Default::default()
        });

        assert_eq!(discoverer.global_paths().await.len(), 2);
    }

    #[tokio::test]
    async fn test_extension_paths_filter_missing() {
        let home = tempfile::tempdir().unwrap();
        let ext_dir = tempfile::tempdir().unwrap();
        std::fs::write(ext_dir.path().join("STYLE.md"), "style").unwrap();

        let registry = ConfigExtensionRegistry::new(vec![crate::config::ExtensionConfig {
            name: "style".to_string(),
            path: ext_dir.path().to_path_buf(),
            active: true,
            context_files: vec![PathBuf::from("STYLE.md"), PathBuf::from("MISSING.md")],
        }]);

        let paths = discoverer(home.path())
            .extension_paths(&registry)
            .await
            .unwrap();
        assert_eq!(paths, vec![normalize_path(&ext_dir.path().join("STYLE.md"))]);
    }

    struct OfflineRegistry;

    #[async_trait::async_trait]
    impl ExtensionRegistry for OfflineRegistry {
        async fn context_files(&self) -> Result<Vec<PathBuf>, MemoryError> {
            Err(MemoryError::Extension("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_extension_registry_failure_is_tier_discovery_error() {
        let home = tempfile::tempdir().unwrap();

        let err = discoverer(home.path())
            .extension_paths(&OfflineRegistry)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            MemoryError::Discovery {
                tier: Tier::Extension,
                ..
            }
        ));
        assert!(err.to_string().contains("offline"));
    }
}
