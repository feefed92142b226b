//! Hook responses that hand discovered memory back to Claude Code.

use serde::{Deserialize, Serialize};

/// Inner content of a context-injecting hook response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextHookOutput {
    pub hook_event_name: String,
    pub additional_context: String,
}

/// Hook response wrapped in `hookSpecificOutput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextHookResponse {
    pub hook_specific_output: ContextHookOutput,
}

impl ContextHookResponse {
    /// Build a response for the given event carrying additional context.
    #[must_use]
    pub fn new(hook_event_name: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            hook_specific_output: ContextHookOutput {
                hook_event_name: hook_event_name.into(),
                additional_context: context.into(),
            },
        }
    }

    /// Response for a `PostToolUse` event.
    #[must_use]
    pub fn post_tool_use(context: impl Into<String>) -> Self {
        Self::new("PostToolUse", context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_post_tool_use() {
        let response = ContextHookResponse::post_tool_use("--- Context from: CLAUDE.md ---");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["hookSpecificOutput"]["hookEventName"], "PostToolUse");
        assert_eq!(
            json["hookSpecificOutput"]["additionalContext"],
            "--- Context from: CLAUDE.md ---"
        );
    }
}
