//! Rules file validation tool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use mailsieve_engine::{load_yaml, validate_rules};

use crate::tool::{require_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Validate a rules YAML file for schema compliance and pattern safety.
pub struct ValidateRulesTool;

#[async_trait]
impl Tool for ValidateRulesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "validate_rules_yaml".to_string(),
            description:
                "Validate a rules YAML file for syntax, schema compliance, and regex patterns."
                    .to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Path to the rules YAML file"
                    }
                },
                "required": ["file_path"]
            }),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let file_path = require_str(&input, "file_path")?;
        let path = context.resolve(file_path);
        debug!(path = %path.display(), "validating rules file");

        let doc = match load_yaml(&path) {
            Ok(doc) => doc,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        let report = validate_rules(&doc);
        let payload = serde_json::to_value(&report)
            .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization: {e}")))?;
        ToolResult::json(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn test_context() -> ToolContext {
        ToolContext {
            working_directory: PathBuf::from("/tmp"),
        }
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn valid_file_reports_rule_count() {
        let file = write_temp(
            "version: 1\nrules:\n  - name: r\n    conditions:\n      subject: [\"invoice\"]\n",
        );
        let tool = ValidateRulesTool;
        let result = tool
            .execute(
                serde_json::json!({"file_path": file.path().to_str().unwrap()}),
                &test_context(),
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["valid"], true);
        assert_eq!(parsed["ruleCount"], 1);
    }

    #[tokio::test]
    async fn structural_errors_are_collected_not_thrown() {
        let file = write_temp("rules:\n  - conditions: {}\n");
        let tool = ValidateRulesTool;
        let result = tool
            .execute(
                serde_json::json!({"file_path": file.path().to_str().unwrap()}),
                &test_context(),
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["valid"], false);
        let errors = parsed["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2); // missing version, missing rule name
    }

    #[tokio::test]
    async fn missing_file_is_an_error_payload() {
        let tool = ValidateRulesTool;
        let result = tool
            .execute(
                serde_json::json!({"file_path": "/no/such/rules.yaml"}),
                &test_context(),
            )
            .await
            .unwrap();

        assert!(result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert!(parsed["error"].as_str().unwrap().contains("failed to read"));
    }

    #[tokio::test]
    async fn missing_argument_is_invalid_input() {
        let tool = ValidateRulesTool;
        let err = tool
            .execute(serde_json::json!({}), &test_context())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
