//! Pattern safety analysis: compile checks plus backtracking-risk linting.
//!
//! The risk lint is purely syntactic (regex-on-regex over the pattern
//! source text), not a complexity proof. False positives and negatives
//! are acceptable: nothing downstream ever rejects a pattern for a
//! warning. The lint is kept even though this crate's `regex` dialect
//! cannot backtrack, because the same rule files feed backtracking
//! engines elsewhere.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::sync::OnceLock;

/// Outcome of analyzing a single pattern.
#[derive(Debug, Clone, Serialize)]
pub struct PatternReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

/// Heuristic signatures for catastrophic-backtracking risk, matched
/// against the pattern's source text. Several may fire at once.
fn risk_signatures() -> &'static [(Regex, &'static str)] {
    static SIGNATURES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    SIGNATURES.get_or_init(|| {
        vec![
            (
                Regex::new(r"(\.\*){2,}").expect("risk signature compiles"),
                "multiple wildcard repetitions in sequence",
            ),
            (
                Regex::new(r"\.\*\+").expect("risk signature compiles"),
                "wildcard repetition followed by +",
            ),
            (
                Regex::new(r"\(\.\+\)\*").expect("risk signature compiles"),
                "(.+)* pattern",
            ),
            (
                Regex::new(r"\(\[[^\]]*\]\+\)\*").expect("risk signature compiles"),
                "([...]+)* pattern",
            ),
        ]
    })
}

/// Compile `pattern` with case-insensitive semantics and screen it for
/// backtracking-risk signatures.
///
/// Compile failure yields `valid = false` with a human-readable error and
/// no warnings. On success, each triggered signature adds one advisory
/// warning.
pub fn analyze_pattern(pattern: &str) -> PatternReport {
    if let Err(e) = RegexBuilder::new(pattern).case_insensitive(true).build() {
        return PatternReport {
            valid: false,
            error: Some(e.to_string()),
            warnings: Vec::new(),
        };
    }

    let warnings = risk_signatures()
        .iter()
        .filter(|(signature, _)| signature.is_match(pattern))
        .map(|(_, desc)| format!("Performance warning: {desc} (catastrophic backtracking risk)"))
        .collect();

    PatternReport {
        valid: true,
        error: None,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_pattern_is_clean() {
        let report = analyze_pattern("invoice");
        assert!(report.valid);
        assert!(report.error.is_none());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn invalid_pattern_reports_error_without_warnings() {
        let report = analyze_pattern("[unclosed");
        assert!(!report.valid);
        assert!(report.error.is_some());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn analyzer_never_panics_on_garbage() {
        for p in ["(", ")", "a{999999999999}", "\\", "(?P<", "*"] {
            let _ = analyze_pattern(p);
        }
    }

    #[test]
    fn sequential_wildcards_warn() {
        let report = analyze_pattern(".*.*");
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("multiple wildcard repetitions"));
    }

    #[test]
    fn spaced_wildcards_do_not_warn() {
        // Signature requires the repetitions to be adjacent.
        let report = analyze_pattern(".*foo.*");
        assert!(report.valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn nested_plus_star_group_warns() {
        let report = analyze_pattern("(.+)*");
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("(.+)*")));
    }

    #[test]
    fn nested_class_plus_star_group_warns() {
        let report = analyze_pattern("([a-z]+)*end");
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("([...]+)*")));
    }

    #[test]
    fn lint_is_syntactic_not_semantic() {
        // ".*+" inside a character class is harmless, but the lint only
        // sees source text. Advisory false positives are acceptable.
        let report = analyze_pattern("[.*+]");
        assert!(report.valid);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("followed by +")));
    }

    #[test]
    fn several_signatures_can_fire_at_once() {
        let report = analyze_pattern("(.+)*.*.*");
        assert!(report.valid);
        assert!(report.warnings.len() >= 2);
    }
}
