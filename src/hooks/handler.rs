//! Hook handler that turns file-access events into just-in-time memory.

use std::sync::Arc;

use crate::memory::MemoryManager;

use super::input::HookInput;
use super::response::ContextHookResponse;

/// Errors that can occur during hook handling.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to parse hook input: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unknown hook event: {0}")]
    UnknownEvent(String),
}

/// Feeds file accesses reported by hooks into a [`MemoryManager`].
pub struct ContextHookHandler {
    manager: Arc<MemoryManager>,
}

impl ContextHookHandler {
    /// Create a handler backed by a shared memory manager.
    #[must_use]
    pub fn new(manager: Arc<MemoryManager>) -> Self {
        Self { manager }
    }

    /// Handle a JSON hook input and return a JSON response, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be parsed or the event is unknown.
    pub async fn handle_json(&self, input: &str) -> Result<Option<String>, HookError> {
        let hook_input: HookInput = serde_json::from_str(input)?;
        match self.handle(&hook_input).await? {
            Some(response) => Ok(Some(serde_json::to_string(&response)?)),
            None => Ok(None),
        }
    }

    /// Handle a hook input.
    ///
    /// Returns a response only when the access surfaced memory that had not
    /// been delivered before.
    ///
    /// # Errors
    ///
    /// Returns `HookError::UnknownEvent` for events other than `PostToolUse`.
    pub async fn handle(&self, input: &HookInput) -> Result<Option<ContextHookResponse>, HookError> {
        if !input.is_post_tool_use() {
            return Err(HookError::UnknownEvent(input.hook_event_name.clone()));
        }

        let Some(path) = input.accessed_path() else {
            tracing::trace!(tool = ?input.get_tool_name(), "Tool does not access a file");
            return Ok(None);
        };

        let discovered = self.manager.discover_context_in_workspace(&path).await;
        if discovered.content.is_empty() {
            if !discovered.is_empty() {
                tracing::debug!(
                    files = discovered.files.len(),
                    "New memory files were blank, nothing to return"
                );
            }
            return Ok(None);
        }

        tracing::debug!(
            path = %path.display(),
            files = discovered.files.len(),
            "Returning just-in-time memory to hook"
        );
        Ok(Some(ContextHookResponse::post_tool_use(discovered.content)))
    }
}
