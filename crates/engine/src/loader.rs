//! Fresh-per-call document loading.
//!
//! Every validation or evaluation call reads its documents from disk
//! anew: a single scoped read with no partial results on failure, and no
//! state retained between calls. The engine never writes these files.

use std::fs;
use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::schema::{RuleDocument, SafeSenderDocument};

/// Read a file and parse it into an untyped YAML tree.
pub fn load_yaml(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value = serde_yaml::from_str(&contents)?;
    debug!(path = %path.display(), "loaded YAML document");
    Ok(value)
}

/// Load and type a rules document.
pub fn load_rules(path: &Path) -> Result<RuleDocument> {
    let contents = fs::read_to_string(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc: RuleDocument = serde_yaml::from_str(&contents)?;
    debug!(path = %path.display(), rules = doc.rules.len(), "loaded rules document");
    Ok(doc)
}

/// Load and type a safe-senders document. Accepts both the mapping and
/// the bare-sequence serialization (see [`SafeSenderDocument::from_value`]).
pub fn load_safe_senders(path: &Path) -> Result<SafeSenderDocument> {
    let value = load_yaml(path)?;
    let doc = SafeSenderDocument::from_value(&value);
    debug!(path = %path.display(), patterns = doc.safe_senders.len(), "loaded safe senders");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rules_file() {
        let file = write_temp(
            "version: 1\nrules:\n  - name: r\n    conditions:\n      subject: [\"x\"]\n",
        );
        let doc = load_rules(file.path()).unwrap();
        assert_eq!(doc.rules.len(), 1);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_rules(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_temp("version: [unclosed\n");
        let err = load_yaml(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn safe_senders_mapping_and_bare_list_both_load() {
        let mapping = write_temp("safe_senders:\n  - \"a@x\\\\.com\"\n");
        let doc = load_safe_senders(mapping.path()).unwrap();
        assert_eq!(doc.safe_senders.len(), 1);

        let bare = write_temp("- \"a@x\\\\.com\"\n- \"b@x\\\\.com\"\n");
        let doc = load_safe_senders(bare.path()).unwrap();
        assert_eq!(doc.safe_senders.len(), 2);
    }
}
