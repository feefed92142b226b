//! Hook input types for Claude Code tool events.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tools whose input names a single file that was read or written.
pub const FILE_ACCESS_TOOLS: &[&str] = &[
    "Read",
    "Write",
    "Edit",
    "MultiEdit",
    "NotebookEdit",
];

/// Event name for completed tool calls.
pub const POST_TOOL_USE: &str = "PostToolUse";

/// Tool input keys that carry the accessed file path, in lookup order.
const PATH_KEYS: &[&str] = &["file_path", "notebook_path", "path"];

/// Input received from Claude Code hook events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookInput {
    /// The hook event name (`PostToolUse`, `Stop`, etc.).
    pub hook_event_name: String,

    /// The session ID for the current Claude Code session.
    #[serde(default)]
    pub session_id: String,

    /// Current working directory.
    #[serde(default)]
    pub cwd: Option<String>,

    /// Tool name (for tool events).
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Tool input parameters.
    #[serde(default)]
    pub tool_input: Option<serde_json::Value>,
}

impl HookInput {
    /// Check if this reports a completed tool call.
    #[must_use]
    pub fn is_post_tool_use(&self) -> bool {
        self.hook_event_name == POST_TOOL_USE
    }

    /// Get the tool name if available.
    #[must_use]
    pub fn get_tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }

    /// Path of the file a file-access tool touched.
    ///
    /// Relative paths resolve against `cwd` when present. Returns `None` for
    /// tools that do not access a single file.
    #[must_use]
    pub fn accessed_path(&self) -> Option<PathBuf> {
        let tool = self.get_tool_name()?;
        if !FILE_ACCESS_TOOLS.contains(&tool) {
            return None;
        }

        let input = self.tool_input.as_ref()?;
        let raw = PATH_KEYS
            .iter()
            .find_map(|key| input.get(*key).and_then(serde_json::Value::as_str))
            .filter(|path| !path.is_empty())?;

        let path = Path::new(raw);
        match (&self.cwd, path.is_absolute()) {
            (Some(cwd), false) => Some(Path::new(cwd).join(path)),
            _ => Some(path.to_path_buf()),
        }
    }
}
