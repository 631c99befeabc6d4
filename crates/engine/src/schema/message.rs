//! The candidate message an evaluation runs against.

use serde::Deserialize;
use std::collections::BTreeMap;

/// An email under evaluation. Arrives as JSON from the tool boundary;
/// `from` and `subject` are required, the rest optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub from: String,
    pub subject: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let msg: Message =
            serde_json::from_str(r#"{"from": "x@y.com", "subject": "hi"}"#).unwrap();
        assert!(msg.body.is_none());
        assert!(msg.headers.is_empty());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let result: Result<Message, _> = serde_json::from_str(r#"{"from": "x@y.com"}"#);
        assert!(result.is_err());
    }
}
