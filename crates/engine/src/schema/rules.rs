//! Rule document types: `RuleDocument`, `Rule`, `ConditionSet`.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// A full rules document. Rule order is significant: the evaluator
/// applies the first matching rule and stops.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleDocument {
    /// Document format version. YAML strings and numbers both accepted.
    #[serde(default, deserialize_with = "lenient_scalar_string")]
    pub version: Option<String>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// A single named filter rule.
///
/// `actions` is an opaque payload: the engine returns it verbatim on a
/// match and never interprets or executes it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rule {
    pub name: String,
    /// Legacy exports encode this as the strings "True"/"False";
    /// both are coerced to a real bool at parse time.
    #[serde(default = "default_enabled", deserialize_with = "lenient_bool")]
    pub enabled: bool,
    #[serde(default)]
    pub conditions: ConditionSet,
    #[serde(default)]
    pub actions: Value,
}

/// Pattern-based conditions over message fields.
///
/// An empty set never matches. `body` and `header` are accepted by the
/// schema for forward compatibility but are not yet evaluated (see
/// [`crate::evaluator`]).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConditionSet {
    #[serde(rename = "type", default, deserialize_with = "lenient_combine")]
    pub combine: Combine,
    #[serde(default, deserialize_with = "lenient_patterns")]
    pub from: Vec<String>,
    #[serde(default, deserialize_with = "lenient_patterns")]
    pub subject: Vec<String>,
    #[serde(default, deserialize_with = "lenient_patterns")]
    pub body: Vec<String>,
    #[serde(default, deserialize_with = "lenient_patterns")]
    pub header: Vec<String>,
}

impl ConditionSet {
    /// True when no field declares any pattern.
    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
            && self.subject.is_empty()
            && self.body.is_empty()
            && self.header.is_empty()
    }
}

/// How a rule's condition fields combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combine {
    And,
    #[default]
    Or,
}

fn default_enabled() -> bool {
    true
}

/// Accept a real bool or a string-encoded one. Anything unrecognized
/// counts as enabled: only an explicit false disables a rule.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => !s.eq_ignore_ascii_case("false"),
        _ => true,
    })
}

/// Accept "AND"/"OR" in any case; anything else falls back to OR.
fn lenient_combine<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Combine, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if s.eq_ignore_ascii_case("and") => Combine::And,
        _ => Combine::Or,
    })
}

/// Accept a sequence of strings, a single bare string (wrapped), or
/// anything else (treated as absent). Non-string sequence entries are
/// dropped.
fn lenient_patterns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Sequence(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    })
}

/// Accept a string or a number for `version`.
fn lenient_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let doc: RuleDocument = serde_yaml::from_str(
            r#"
version: "1.0"
rules:
  - name: phish
    conditions:
      type: OR
      subject: ["invoice"]
    actions:
      label: spam
"#,
        )
        .unwrap();

        assert_eq!(doc.version.as_deref(), Some("1.0"));
        assert_eq!(doc.rules.len(), 1);
        let rule = &doc.rules[0];
        assert_eq!(rule.name, "phish");
        assert!(rule.enabled);
        assert_eq!(rule.conditions.combine, Combine::Or);
        assert_eq!(rule.conditions.subject, vec!["invoice"]);
    }

    #[test]
    fn numeric_version_becomes_string() {
        let doc: RuleDocument = serde_yaml::from_str("version: 1\nrules: []").unwrap();
        assert_eq!(doc.version.as_deref(), Some("1"));
    }

    #[test]
    fn legacy_string_enabled_is_coerced() {
        let doc: RuleDocument = serde_yaml::from_str(
            r#"
version: 1
rules:
  - name: off-rule
    enabled: "False"
    conditions: {}
  - name: on-rule
    enabled: "True"
    conditions: {}
"#,
        )
        .unwrap();
        assert!(!doc.rules[0].enabled);
        assert!(doc.rules[1].enabled);
    }

    #[test]
    fn combine_defaults_to_or_and_is_case_insensitive() {
        let set: ConditionSet = serde_yaml::from_str("from: [\"a\"]").unwrap();
        assert_eq!(set.combine, Combine::Or);

        let set: ConditionSet = serde_yaml::from_str("type: and\nfrom: [\"a\"]").unwrap();
        assert_eq!(set.combine, Combine::And);

        let set: ConditionSet = serde_yaml::from_str("type: 42\nfrom: [\"a\"]").unwrap();
        assert_eq!(set.combine, Combine::Or);
    }

    #[test]
    fn bare_scalar_pattern_is_wrapped() {
        let set: ConditionSet = serde_yaml::from_str("subject: invoice").unwrap();
        assert_eq!(set.subject, vec!["invoice"]);
    }

    #[test]
    fn malformed_pattern_field_is_treated_as_absent() {
        let set: ConditionSet = serde_yaml::from_str("from:\n  nested: map").unwrap();
        assert!(set.from.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn unknown_rule_keys_are_tolerated() {
        let doc: RuleDocument = serde_yaml::from_str(
            r#"
version: 1
rules:
  - name: legacy
    conditions: {}
    exceptions:
      from: ["boss@corp\\.com"]
"#,
        )
        .unwrap();
        assert_eq!(doc.rules[0].name, "legacy");
    }

    #[test]
    fn actions_are_preserved_verbatim() {
        let doc: RuleDocument = serde_yaml::from_str(
            r#"
version: 1
rules:
  - name: r
    conditions: {}
    actions:
      move_to: Junk
      assign_to_category: suspect
"#,
        )
        .unwrap();
        let actions = &doc.rules[0].actions;
        assert_eq!(
            actions.get("move_to").and_then(Value::as_str),
            Some("Junk")
        );
    }
}
