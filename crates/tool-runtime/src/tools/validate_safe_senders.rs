//! Safe-senders file validation tool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use mailsieve_engine::{load_yaml, validate_safe_senders};

use crate::tool::{require_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Validate a safe-senders YAML file for syntax and pattern safety.
pub struct ValidateSafeSendersTool;

#[async_trait]
impl Tool for ValidateSafeSendersTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "validate_safe_senders".to_string(),
            description: "Validate a safe-senders YAML file for syntax and regex patterns."
                .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the safe-senders YAML file"
                    }
                },
                "required": ["file_path"]
            }),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let file_path = require_str(&input, "file_path")?;
        let path = context.resolve(file_path);
        debug!(path = %path.display(), "validating safe senders file");

        let doc = match load_yaml(&path) {
            Ok(doc) => doc,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        let report = validate_safe_senders(&doc);
        let payload = serde_json::to_value(&report)
            .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization: {e}")))?;
        ToolResult::json(&payload)
    }
}
