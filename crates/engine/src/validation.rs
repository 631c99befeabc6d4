//! Structural validation of rule and safe-sender documents.
//!
//! Validation runs on the untyped YAML tree so that broken documents are
//! reported, never thrown: every problem lands in the returned report's
//! `errors` (blocking) or `warnings` (advisory) list. Every embedded
//! pattern is screened through [`crate::analyzer`].

use serde::Serialize;
use serde_yaml::Value;
use std::collections::HashSet;

use crate::analyzer::analyze_pattern;

/// Condition fields that may carry pattern lists.
const CONDITION_FIELDS: [&str; 4] = ["from", "subject", "body", "header"];

/// Validation outcome for a rules document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesetReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub rule_count: usize,
}

/// Validation outcome for a safe-senders document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeSenderReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub pattern_count: usize,
}

/// Validate the structural schema of a rules document.
///
/// Checks: top-level shape, required `version` and `rules` fields,
/// per-rule `name` and `conditions`, and every nested pattern.
pub fn validate_rules(doc: &Value) -> RulesetReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut rule_count = 0;

    if doc.as_mapping().is_none() {
        return RulesetReport {
            valid: false,
            errors: vec!["Rules document is not a mapping".to_string()],
            warnings,
            rule_count,
        };
    }

    if doc.get("version").is_none() {
        errors.push(r#"Missing "version" field"#.to_string());
    }

    match doc.get("rules") {
        None => errors.push(r#"Missing "rules" field"#.to_string()),
        Some(Value::Sequence(rules)) => {
            rule_count = rules.len();
            for (index, rule) in rules.iter().enumerate() {
                validate_single_rule(index, rule, &mut errors, &mut warnings);
            }
        }
        Some(_) => errors.push(r#""rules" must be a sequence"#.to_string()),
    }

    RulesetReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        rule_count,
    }
}

fn validate_single_rule(
    index: usize,
    rule: &Value,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let name = rule.get("name").and_then(Value::as_str);
    if name.is_none() {
        errors.push(format!(r#"Rule {index}: Missing "name" field"#));
    }
    let label = name.unwrap_or("unnamed");

    let Some(conditions) = rule.get("conditions") else {
        errors.push(format!(r#"Rule {index}: Missing "conditions" field"#));
        return;
    };

    for field in CONDITION_FIELDS {
        // Mirror the schema's leniency: a bare scalar counts as a
        // one-pattern list, so it must be screened here too.
        let patterns: Vec<&str> = match conditions.get(field) {
            Some(Value::String(pattern)) => vec![pattern.as_str()],
            Some(Value::Sequence(patterns)) => {
                patterns.iter().filter_map(Value::as_str).collect()
            }
            _ => continue,
        };
        for pattern in patterns {
            let report = analyze_pattern(pattern);
            if let Some(error) = report.error {
                errors.push(format!(
                    "Rule {index} ({label}): Invalid {field} pattern: {error}"
                ));
            }
            for warning in report.warnings {
                warnings.push(format!("Rule {index} ({label}): {warning}"));
            }
        }
    }
}

/// Validate the structural schema of a safe-senders document.
///
/// Duplicate patterns (exact string equality) are warnings, not errors,
/// each referencing the later index.
pub fn validate_safe_senders(doc: &Value) -> SafeSenderReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut pattern_count = 0;

    match doc.get("safe_senders") {
        None => errors.push(r#"Missing "safe_senders" field"#.to_string()),
        Some(Value::Sequence(patterns)) => {
            pattern_count = patterns.len();
            let mut seen: HashSet<&str> = HashSet::new();
            for (index, pattern) in patterns.iter().enumerate() {
                let Some(pattern) = pattern.as_str() else {
                    errors.push(format!("Pattern at index {index} is not a string"));
                    continue;
                };
                if !seen.insert(pattern) {
                    warnings.push(format!("Duplicate pattern at index {index}: {pattern}"));
                }
                let report = analyze_pattern(pattern);
                if let Some(error) = report.error {
                    errors.push(format!("Invalid pattern at index {index}: {error}"));
                }
                for warning in report.warnings {
                    warnings.push(format!("Pattern {index}: {warning}"));
                }
            }
        }
        Some(_) => errors.push(r#""safe_senders" must be a sequence"#.to_string()),
    }

    SafeSenderReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        pattern_count,
    }
}
