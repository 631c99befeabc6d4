use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Describes a tool's interface: name, human-readable description, and a
/// JSON Schema for its input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Result of executing a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Result content, a JSON document rendered as text.
    pub content: String,
    /// Whether this result represents an error payload.
    pub is_error: bool,
}

impl ToolResult {
    /// Pretty-printed JSON success result.
    pub fn json(value: &Value) -> Result<Self, ToolError> {
        Ok(Self {
            content: serde_json::to_string_pretty(value)
                .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization: {e}")))?,
            is_error: false,
        })
    }

    /// An `{"error": …}` payload with the error flag set. Used for
    /// recoverable failures (missing file, malformed document) that
    /// should terminate only this request.
    pub fn error(message: impl Into<String>) -> Self {
        let payload = serde_json::json!({ "error": message.into() });
        Self {
            content: serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|_| payload.to_string()),
            is_error: true,
        }
    }
}

/// Context passed to tool execution.
pub struct ToolContext {
    /// Base directory against which relative file paths resolve.
    pub working_directory: PathBuf,
}

impl ToolContext {
    /// Resolve a possibly-relative path against the working directory.
    pub fn resolve(&self, requested: &str) -> PathBuf {
        let candidate = Path::new(requested);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.working_directory.join(candidate)
        }
    }
}

/// The primary extension point: all tools implement this trait.
///
/// Tools are object-safe, Send + Sync, and async.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON input.
    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl fmt::Display for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.description)
    }
}

/// Extract a required string argument from a tool input object.
pub(crate) fn require_str<'a>(input: &'a Value, field: &str) -> Result<&'a str, ToolError> {
    input
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidInput(format!("missing '{field}' field")))
}

/// Simple echo tool for testing purposes.
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "echo".to_string(),
            description: "Echoes back the input message. For testing.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "The message to echo back"
                    }
                },
                "required": ["message"]
            }),
        }
    }

    async fn execute(&self, input: Value, _context: &ToolContext) -> Result<ToolResult, ToolError> {
        let message = require_str(&input, "message")?;
        Ok(ToolResult {
            content: message.to_string(),
            is_error: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definition_roundtrip() {
        let def = ToolDefinition {
            name: "test_tool".to_string(),
            description: "A test tool".to_string(),
            input_schema: serde_json::json!({"type": "object"}),
        };
        let json = serde_json::to_string(&def).unwrap();
        let roundtrip: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.name, "test_tool");
    }

    #[test]
    fn error_result_carries_flag_and_payload() {
        let result = ToolResult::error("file not found");
        assert!(result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["error"], "file not found");
    }

    #[test]
    fn context_resolves_relative_paths() {
        let ctx = ToolContext {
            working_directory: PathBuf::from("/data"),
        };
        assert_eq!(ctx.resolve("rules.yaml"), PathBuf::from("/data/rules.yaml"));
        assert_eq!(ctx.resolve("/abs/rules.yaml"), PathBuf::from("/abs/rules.yaml"));
    }

    #[tokio::test]
    async fn echo_tool_roundtrips() {
        let tool = EchoTool;
        assert_eq!(tool.definition().name, "echo");

        let ctx = ToolContext {
            working_directory: PathBuf::from("/tmp"),
        };
        let result = tool
            .execute(serde_json::json!({"message": "hello world"}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.content, "hello world");
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn echo_tool_rejects_missing_message() {
        let tool = EchoTool;
        let ctx = ToolContext {
            working_directory: PathBuf::from("/tmp"),
        };
        let err = tool
            .execute(serde_json::json!({}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
