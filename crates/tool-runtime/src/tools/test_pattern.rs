//! Interactive pattern testing tool.

use async_trait::async_trait;
use regex::RegexBuilder;
use serde_json::Value;
use tracing::debug;

use mailsieve_engine::{analyze_pattern, measure_pattern};

use crate::tool::{require_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Test a regex pattern against sample strings, with pattern-safety
/// warnings and an optional performance probe.
pub struct TestRegexPatternTool;

#[async_trait]
impl Tool for TestRegexPatternTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "test_regex_pattern".to_string(),
            description: "Test a regex pattern against sample email header strings.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "pattern": {
                        "type": "string",
                        "description": "Regex pattern to test (case-insensitive)"
                    },
                    "test_strings": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Strings to test the pattern against"
                    },
                    "check_performance": {
                        "type": "boolean",
                        "description": "Run the 1000-iteration performance probe",
                        "default": false
                    }
                },
                "required": ["pattern", "test_strings"]
            }),
        }
    }

    async fn execute(&self, input: Value, _context: &ToolContext) -> Result<ToolResult, ToolError> {
        let pattern = require_str(&input, "pattern")?;
        let test_strings: Vec<String> = input
            .get("test_strings")
            .and_then(Value::as_array)
            .ok_or_else(|| ToolError::InvalidInput("missing 'test_strings' field".to_string()))?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        let check_performance = input
            .get("check_performance")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        debug!(pattern, samples = test_strings.len(), "testing pattern");

        let analysis = analyze_pattern(pattern);
        if !analysis.valid {
            let reason = analysis.error.unwrap_or_else(|| "unknown error".to_string());
            return Ok(ToolResult::error(format!("Invalid regex: {reason}")));
        }

        // Analysis already proved the pattern compiles.
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        let results: Vec<Value> = test_strings
            .iter()
            .map(|s| {
                let detail = re.find(s).map(|m| m.as_str().to_string());
                serde_json::json!({
                    "string": s,
                    "matches": detail.is_some(),
                    "matchDetails": detail,
                })
            })
            .collect();
        let match_count = results
            .iter()
            .filter(|r| r["matches"] == Value::Bool(true))
            .count();

        let performance = if check_performance {
            let report = measure_pattern(pattern, &test_strings)
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
            serde_json::to_value(&report)
                .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization: {e}")))?
        } else {
            Value::Null
        };

        ToolResult::json(&serde_json::json!({
            "pattern": pattern,
            "valid": true,
            "warnings": analysis.warnings,
            "results": results,
            "performance": performance,
            "matchCount": match_count,
            "totalCount": test_strings.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_context() -> ToolContext {
        ToolContext {
            working_directory: PathBuf::from("/tmp"),
        }
    }

    #[tokio::test]
    async fn matches_are_counted_case_insensitively() {
        let tool = TestRegexPatternTool;
        let result = tool
            .execute(
                serde_json::json!({
                    "pattern": "invoice",
                    "test_strings": ["Urgent INVOICE", "weekly digest"]
                }),
                &test_context(),
            )
            .await
            .unwrap();

        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["matchCount"], 1);
        assert_eq!(parsed["totalCount"], 2);
        assert_eq!(parsed["results"][0]["matches"], true);
        assert_eq!(parsed["results"][0]["matchDetails"], "INVOICE");
        assert_eq!(parsed["results"][1]["matches"], false);
        assert!(parsed["performance"].is_null());
    }

    #[tokio::test]
    async fn invalid_pattern_is_an_error_payload() {
        let tool = TestRegexPatternTool;
        let result = tool
            .execute(
                serde_json::json!({"pattern": "[broken", "test_strings": ["x"]}),
                &test_context(),
            )
            .await
            .unwrap();

        assert!(result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert!(parsed["error"].as_str().unwrap().starts_with("Invalid regex:"));
    }

    #[tokio::test]
    async fn risky_pattern_carries_warnings() {
        let tool = TestRegexPatternTool;
        let result = tool
            .execute(
                serde_json::json!({"pattern": "(.+)*spam", "test_strings": ["spam"]}),
                &test_context(),
            )
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["valid"], true);
        assert!(!parsed["warnings"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn performance_probe_is_opt_in() {
        let tool = TestRegexPatternTool;
        let result = tool
            .execute(
                serde_json::json!({
                    "pattern": "invoice",
                    "test_strings": ["an invoice"],
                    "check_performance": true
                }),
                &test_context(),
            )
            .await
            .unwrap();

        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert!(parsed["performance"]["avgTimeMs"].is_number());
        assert!(parsed["performance"]["rating"].is_string());
    }

    #[tokio::test]
    async fn missing_test_strings_is_invalid_input() {
        let tool = TestRegexPatternTool;
        let err = tool
            .execute(serde_json::json!({"pattern": "x"}), &test_context())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
