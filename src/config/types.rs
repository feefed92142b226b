//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default memory filename.
pub const DEFAULT_MEMORY_FILENAME: &str = "CLAUDE.md";

/// Default upper bound on directories visited by the downward project scan.
pub const DEFAULT_MAX_SCAN_DIRS: usize = 200;

/// Default ceiling on directories visited by one just-in-time walk.
pub const DEFAULT_MAX_JIT_HOPS: usize = 32;

/// Memory file discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySettings {
    /// File names treated as memory files.
    pub filenames: Vec<String>,
    /// Directory holding global memory files. Defaults to `~/.claude`.
    pub global_dir: Option<PathBuf>,
    /// Maximum directories visited when scanning below a workspace directory.
    pub max_scan_dirs: usize,
    /// Directory names never descended into.
    pub ignored_dirs: Vec<String>,
    /// Maximum directories visited by one upward walk.
    pub max_jit_hops: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            filenames: vec![DEFAULT_MEMORY_FILENAME.to_string()],
            global_dir: None,
            max_scan_dirs: DEFAULT_MAX_SCAN_DIRS,
            ignored_dirs: [".git", "node_modules", "target", ".venv", "dist", "build"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_jit_hops: DEFAULT_MAX_JIT_HOPS,
        }
    }
}

impl MemorySettings {
    /// Resolve the global memory directory.
    #[must_use]
    pub fn resolved_global_dir(&self) -> Option<PathBuf> {
        self.global_dir
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".claude")))
    }
}

/// Workspace trust and layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Whether the user approved file-based context loading for this workspace.
    pub trusted: bool,
    /// Workspace directories scanned for project memory.
    pub directories: Vec<PathBuf>,
    /// Upward traversal boundaries. Falls back to `directories` when empty.
    pub trusted_roots: Vec<PathBuf>,
}

impl WorkspaceConfig {
    /// Trusted roots for just-in-time traversal.
    #[must_use]
    pub fn effective_trusted_roots(&self) -> Vec<PathBuf> {
        if self.trusted_roots.is_empty() {
            self.directories.clone()
        } else {
            self.trusted_roots.clone()
        }
    }
}

/// An installed extension that may contribute context files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Extension name.
    pub name: String,
    /// Installation directory; relative context files resolve against it.
    #[serde(default)]
    pub path: PathBuf,
    /// Inactive extensions contribute nothing.
    #[serde(default = "default_active")]
    pub active: bool,
    /// Context files shipped by the extension.
    #[serde(default)]
    pub context_files: Vec<PathBuf>,
}

fn default_active() -> bool {
    true
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub memory: MemorySettings,
    pub workspace: WorkspaceConfig,
    pub extensions: Vec<ExtensionConfig>,
    /// Instruction text supplied by connected MCP servers.
    pub mcp_instructions: Option<String>,
}
