//! Rule evaluation simulation tool.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use mailsieve_engine::{evaluate, load_rules, load_safe_senders, Message, Verdict};

use crate::tool::{require_str, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};

/// Simulate how an email would be evaluated against a rule set and an
/// optional safe-sender allow-list.
pub struct SimulateEvaluationTool;

#[async_trait]
impl Tool for SimulateEvaluationTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "simulate_rule_evaluation".to_string(),
            description: "Simulate how an email would be evaluated against the rules.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "rules_file": {
                        "type": "string",
                        "description": "Path to the rules YAML file"
                    },
                    "safe_senders_file": {
                        "type": "string",
                        "description": "Path to the safe-senders YAML file (optional)"
                    },
                    "email": {
                        "type": "object",
                        "properties": {
                            "from": { "type": "string" },
                            "subject": { "type": "string" },
                            "body": { "type": "string" },
                            "headers": { "type": "object" }
                        },
                        "required": ["from", "subject"]
                    }
                },
                "required": ["rules_file", "email"]
            }),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult, ToolError> {
        let rules_file = require_str(&input, "rules_file")?;
        let email = input
            .get("email")
            .cloned()
            .ok_or_else(|| ToolError::InvalidInput("missing 'email' field".to_string()))?;
        let message: Message = serde_json::from_value(email)
            .map_err(|e| ToolError::InvalidInput(format!("invalid 'email' object: {e}")))?;

        let rules = match load_rules(&context.resolve(rules_file)) {
            Ok(doc) => doc,
            Err(e) => return Ok(ToolResult::error(e.to_string())),
        };

        let safe_senders = match input.get("safe_senders_file").and_then(Value::as_str) {
            Some(path) => match load_safe_senders(&context.resolve(path)) {
                Ok(doc) => Some(doc),
                Err(e) => return Ok(ToolResult::error(e.to_string())),
            },
            None => None,
        };

        debug!(
            from = %message.from,
            rules = rules.rules.len(),
            "simulating rule evaluation"
        );

        let verdict = evaluate(&rules, safe_senders.as_ref(), &message);
        ToolResult::json(&render_verdict(&verdict)?)
    }
}

/// Render a verdict with its human-readable summary line.
fn render_verdict(verdict: &Verdict) -> Result<Value, ToolError> {
    let mut payload = serde_json::to_value(verdict)
        .map_err(|e| ToolError::ExecutionFailed(format!("JSON serialization: {e}")))?;
    let message = match verdict {
        Verdict::SafeSender => Some("Email from safe sender - no rules applied"),
        Verdict::NoMatch => Some("No rules matched this email"),
        Verdict::RuleMatched { .. } => None,
    };
    if let (Some(message), Some(obj)) = (message, payload.as_object_mut()) {
        obj.insert("message".to_string(), Value::String(message.to_string()));
    }
    Ok(payload)
}
