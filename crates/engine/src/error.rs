//! Error types for document loading and pattern operations.

use std::path::PathBuf;

/// Errors that can occur while loading documents or probing patterns.
///
/// Validation never produces these: structural problems are collected
/// into the report types in [`crate::validation`] instead.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Filesystem I/O error, tagged with the offending path.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Regex pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(String),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
