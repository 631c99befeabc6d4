//! Deterministic rule evaluation with safe-sender precedence.
//!
//! Algorithm, in order:
//! 1. Safe senders win outright: if any allow-list pattern matches the
//!    message's `from`, no rule is consulted.
//! 2. Rules run in document order; the first enabled rule whose
//!    conditions match decides the verdict.
//! 3. Otherwise the verdict is `NoMatch`.
//!
//! Only `from` and `subject` conditions participate in matching; `body`
//! and `header` are schema-accepted for forward compatibility and are
//! skipped with a debug log. AND semantics are per-field: every declared
//! evaluable field must contribute at least one matching pattern,
//! regardless of how many patterns the field lists.
//!
//! Evaluation is read-only and total: patterns that fail to compile are
//! logged and treated as non-matching.

use regex::RegexBuilder;
use serde::Serialize;
use tracing::{debug, warn};

use crate::schema::{Combine, Message, RuleDocument, SafeSenderDocument};

/// A single `(field, pattern)` hit recorded during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedCondition {
    pub field: &'static str,
    pub pattern: String,
}

/// The single evaluation verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verdict {
    /// The sender is allow-listed; no rule was evaluated.
    SafeSender,
    /// The first rule (in document order) whose conditions matched.
    RuleMatched {
        rule: String,
        #[serde(rename = "matchedConditions")]
        matched_conditions: Vec<MatchedCondition>,
        /// The rule's `actions` payload, verbatim and never executed.
        actions: serde_json::Value,
    },
    /// No enabled rule matched.
    NoMatch,
}

/// Evaluate a message against a rule document and an optional
/// safe-sender allow-list. Pure: identical inputs yield identical
/// verdicts, and no input is mutated.
pub fn evaluate(
    rules: &RuleDocument,
    safe_senders: Option<&SafeSenderDocument>,
    message: &Message,
) -> Verdict {
    if let Some(doc) = safe_senders {
        if doc
            .safe_senders
            .iter()
            .any(|pattern| pattern_matches(pattern, &message.from))
        {
            debug!(from = %message.from, "sender is allow-listed");
            return Verdict::SafeSender;
        }
    }

    for rule in &rules.rules {
        if !rule.enabled {
            debug!(rule = %rule.name, "skipping disabled rule");
            continue;
        }
        if let Some(matched) = match_rule(rule, message) {
            return Verdict::RuleMatched {
                rule: rule.name.clone(),
                matched_conditions: matched,
                actions: serde_json::to_value(&rule.actions)
                    .unwrap_or(serde_json::Value::Null),
            };
        }
    }

    Verdict::NoMatch
}

/// Test one rule; `Some(hits)` when it matches, `None` otherwise.
fn match_rule(rule: &crate::schema::Rule, message: &Message) -> Option<Vec<MatchedCondition>> {
    let conditions = &rule.conditions;

    let mut matched = Vec::new();
    for pattern in &conditions.from {
        if pattern_matches(pattern, &message.from) {
            matched.push(MatchedCondition {
                field: "from",
                pattern: pattern.clone(),
            });
        }
    }
    for pattern in &conditions.subject {
        if pattern_matches(pattern, &message.subject) {
            matched.push(MatchedCondition {
                field: "subject",
                pattern: pattern.clone(),
            });
        }
    }

    if !conditions.body.is_empty() || !conditions.header.is_empty() {
        debug!(
            rule = %rule.name,
            "body/header conditions are not evaluated in this version"
        );
    }

    let is_match = match conditions.combine {
        Combine::Or => !matched.is_empty(),
        Combine::And => {
            let from_ok = conditions.from.is_empty()
                || matched.iter().any(|m| m.field == "from");
            let subject_ok = conditions.subject.is_empty()
                || matched.iter().any(|m| m.field == "subject");
            !matched.is_empty() && from_ok && subject_ok
        }
    };

    is_match.then_some(matched)
}

/// Case-insensitive, unanchored match. Compile failures are logged and
/// count as no match so evaluation stays total.
fn pattern_matches(pattern: &str, haystack: &str) -> bool {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(haystack),
        Err(e) => {
            warn!(pattern, error = %e, "skipping pattern that failed to compile");
            false
        }
    }
}
