//! Memory manager: owns the loaded-path state and the public contract.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};

use super::categorize::{sort_files, Categorizer, TierCandidates};
use super::discovery::PathDiscoverer;
use super::extension::{ConfigExtensionRegistry, ExtensionRegistry};
use super::jit::{normalize_path, JitTraverser};
use super::loader::ContentLoader;
use super::types::{
    DiscoveredContext, LoadedPathSet, MemoryEvent, MemoryFileRecord, MemoryStats,
    RefreshSummary, Tier, TierBuffers,
};
use crate::config::MemoryConfig;

/// Default capacity for the memory event broadcast channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;

/// Mutable session state guarded by the manager's lock.
#[derive(Debug, Default)]
struct MemoryState {
    loaded: LoadedPathSet,
    records: Vec<MemoryFileRecord>,
    buffers: TierBuffers,
    mcp_instructions: Option<String>,
}

/// Orchestrates tiered memory loading for one workspace session.
///
/// `refresh` and `discover_context` serialize on an internal lock, so one
/// instance may be shared across tasks behind an `Arc`.
pub struct MemoryManager {
    trusted: bool,
    workspace_dirs: Vec<PathBuf>,
    trusted_roots: Vec<PathBuf>,
    discoverer: PathDiscoverer,
    loader: ContentLoader,
    categorizer: Categorizer,
    jit: JitTraverser,
    registry: Arc<dyn ExtensionRegistry>,
    state: Mutex<MemoryState>,
    events: broadcast::Sender<MemoryEvent>,
}

impl MemoryManager {
    /// Create a manager whose extension tier comes from the configuration.
    #[must_use]
    pub fn new(config: &MemoryConfig) -> Self {
        let registry = Arc::new(ConfigExtensionRegistry::new(config.extensions.clone()));
        Self::with_registry(config, registry)
    }

    /// Create a manager with a custom extension registry.
    #[must_use]
    pub fn with_registry(config: &MemoryConfig, registry: Arc<dyn ExtensionRegistry>) -> Self {
        let workspace_dirs: Vec<PathBuf> = config
            .workspace
            .directories
            .iter()
            .map(|dir| normalize_path(dir))
            .collect();
        let trusted_roots = config
            .workspace
            .effective_trusted_roots()
            .iter()
            .map(|dir| normalize_path(dir))
            .collect();
        let (events, _) = broadcast::channel(DEFAULT_EVENT_CHANNEL_CAPACITY);

        Self {
            trusted: config.workspace.trusted,
            categorizer: Categorizer::new(workspace_dirs.first().cloned()),
            workspace_dirs,
            trusted_roots,
            discoverer: PathDiscoverer::new(&config.memory),
            loader: ContentLoader::new(),
            jit: JitTraverser::new(config.memory.filenames.clone(), config.memory.max_jit_hops),
            registry,
            state: Mutex::new(MemoryState {
                mcp_instructions: config.mcp_instructions.clone(),
                ..MemoryState::default()
            }),
            events,
        }
    }

    /// Whether the workspace is trusted for project and just-in-time reads.
    #[must_use]
    pub fn is_trusted(&self) -> bool {
        self.trusted
    }

    /// Subscribe to memory change notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<MemoryEvent> {
        self.events.subscribe()
    }

    /// Replace the MCP instruction text appended on the next refresh.
    pub async fn set_mcp_instructions(&self, instructions: Option<String>) {
        self.state.lock().await.mcp_instructions = instructions;
    }

    /// Rebuild every tier from scratch.
    ///
    /// Clears the loaded-path set, discovers candidates for all tiers
    /// concurrently, reads them concurrently and rebuilds the tier buffers.
    /// Emits exactly one [`MemoryEvent::Changed`].
    pub async fn refresh(&self) -> RefreshSummary {
        let mut state = self.state.lock().await;
        state.loaded.clear();
        state.records.clear();

        let (global, extension, project) = tokio::join!(
            self.discoverer.global_paths(),
            self.extension_candidates(),
            self.project_candidates(),
        );

        let mut candidates = TierCandidates::new();
        candidates.extend(Tier::Global, global);
        candidates.extend(Tier::Extension, extension);
        candidates.extend(Tier::Project, project);

        let loaded = self.loader.read_all(&candidates.paths()).await;
        let files = self.categorizer.categorize(loaded, &candidates);
        let mut buffers = self.categorizer.build_buffers(&files);

        if self.trusted {
            if let Some(instructions) = state
                .mcp_instructions
                .as_deref()
                .filter(|text| !text.trim().is_empty())
            {
                if !buffers.project.is_empty() {
                    buffers.project.push_str("\n\n");
                }
                buffers.project.push_str(instructions);
            }
        }

        let mut ordered: Vec<_> = files.iter().collect();
        sort_files(&mut ordered);
        ordered.sort_by_key(|file| file.record.tier);
        for file in ordered {
            state.loaded.insert(file.record.path.clone());
            state.records.push(file.record.clone());
        }
        state.buffers = buffers;

        let file_count = state.loaded.len();
        let stats = MemoryStats::from_records(&state.records);
        drop(state);

        tracing::info!(
            files = file_count,
            chars = stats.total_chars,
            trusted = self.trusted,
            "Memory refreshed"
        );
        // No subscribers is not an error.
        let _ = self.events.send(MemoryEvent::Changed { file_count });

        RefreshSummary { file_count, stats }
    }

    async fn extension_candidates(&self) -> Vec<PathBuf> {
        match self.discoverer.extension_paths(self.registry.as_ref()).await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!(error = %e, "Extension discovery failed, tier left empty");
                Vec::new()
            }
        }
    }

    async fn project_candidates(&self) -> Vec<PathBuf> {
        if !self.trusted {
            tracing::debug!("Workspace untrusted, skipping project memory");
            return Vec::new();
        }
        self.discoverer.project_paths(&self.workspace_dirs).await
    }

    /// Load memory files between `accessed_path` and its trusted root that
    /// have not been delivered yet.
    ///
    /// Returns only newly loaded content; a repeated call for the same or a
    /// nested path returns nothing new. Untrusted workspaces always return
    /// empty content without touching the filesystem.
    pub async fn discover_context(
        &self,
        accessed_path: &Path,
        trusted_roots: &[PathBuf],
    ) -> DiscoveredContext {
        if !self.trusted {
            tracing::debug!(path = %accessed_path.display(), "Workspace untrusted, skipping discovery");
            return DiscoveredContext::default();
        }

        let mut state = self.state.lock().await;
        let files = self
            .jit
            .traverse(accessed_path, trusted_roots, &mut state.loaded)
            .await;
        if files.is_empty() {
            return DiscoveredContext::default();
        }

        let mut ordered: Vec<_> = files.iter().collect();
        sort_files(&mut ordered);
        state
            .records
            .extend(ordered.iter().map(|file| file.record.clone()));

        tracing::info!(
            path = %accessed_path.display(),
            files = ordered.len(),
            "Discovered memory just in time"
        );
        DiscoveredContext {
            content: self.categorizer.concatenate(ordered.iter().copied()),
            files: ordered.iter().map(|file| file.record.path.clone()).collect(),
        }
    }

    /// [`discover_context`](Self::discover_context) bounded by the configured
    /// trusted roots.
    pub async fn discover_context_in_workspace(&self, accessed_path: &Path) -> DiscoveredContext {
        self.discover_context(accessed_path, &self.trusted_roots)
            .await
    }

    /// Concatenated global tier.
    pub async fn global_memory(&self) -> String {
        self.state.lock().await.buffers.global.clone()
    }

    /// Concatenated extension tier.
    pub async fn extension_memory(&self) -> String {
        self.state.lock().await.buffers.extension.clone()
    }

    /// Concatenated project tier, including MCP instructions.
    pub async fn environment_memory(&self) -> String {
        self.state.lock().await.buffers.project.clone()
    }

    /// All three tier buffers.
    pub async fn tier_buffers(&self) -> TierBuffers {
        self.state.lock().await.buffers.clone()
    }

    /// Loaded file paths in sorted order.
    pub async fn loaded_paths(&self) -> Vec<PathBuf> {
        self.state.lock().await.loaded.sorted()
    }

    /// Number of loaded files, including just-in-time loads.
    pub async fn loaded_count(&self) -> usize {
        self.state.lock().await.loaded.len()
    }

    /// Per-file details for telemetry.
    pub async fn file_records(&self) -> Vec<MemoryFileRecord> {
        self.state.lock().await.records.clone()
    }

    /// Aggregate counts over the current file records.
    pub async fn stats(&self) -> MemoryStats {
        MemoryStats::from_records(&self.state.lock().await.records)
    }

    /// Total characters across loaded files.
    pub async fn total_char_count(&self) -> usize {
        self.stats().await.total_chars
    }
}
