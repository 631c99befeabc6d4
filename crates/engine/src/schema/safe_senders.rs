//! Safe-sender allow-list document.

use serde_yaml::Value;

/// The safe-sender allow-list: patterns tested against a message's
/// `from` field before any rule is considered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafeSenderDocument {
    pub safe_senders: Vec<String>,
}

impl SafeSenderDocument {
    /// Build from an untyped YAML tree, accepting both shapes the legacy
    /// exporter produced: a mapping with a `safe_senders` key, or a bare
    /// top-level sequence of patterns. Anything else yields an empty list.
    pub fn from_value(value: &Value) -> Self {
        let items = match value {
            Value::Mapping(_) => value.get("safe_senders").and_then(Value::as_sequence),
            Value::Sequence(seq) => Some(seq),
            _ => None,
        };

        let safe_senders = items
            .map(|seq| {
                seq.iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self { safe_senders }
    }
}
