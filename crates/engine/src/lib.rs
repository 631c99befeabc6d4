//! Email filter rule validation and simulation engine.
//!
//! This crate provides:
//! - Typed schema for YAML rule and safe-sender documents with lenient
//!   serde deserialization (parse-then-validate boundary)
//! - Pattern safety analysis: regex compile checks plus heuristic
//!   catastrophic-backtracking linting
//! - Structural document validation producing error/warning diagnostics
//! - Deterministic rule evaluation with safe-sender precedence,
//!   AND/OR condition semantics, and first-match-wins ordering
//! - A wall-clock performance probe for pattern tuning
//!
//! All operations are synchronous, stateless, and pure: documents are
//! loaded fresh per call and nothing is mutated or retained between calls.

pub mod analyzer;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod probe;
pub mod schema;
pub mod validation;

pub use analyzer::{analyze_pattern, PatternReport};
pub use error::{EngineError, Result};
pub use evaluator::{evaluate, MatchedCondition, Verdict};
pub use loader::{load_rules, load_safe_senders, load_yaml};
pub use probe::{measure_pattern, ProbeReport, SpeedRating};
pub use schema::{Combine, ConditionSet, Message, Rule, RuleDocument, SafeSenderDocument};
pub use validation::{validate_rules, validate_safe_senders, RulesetReport, SafeSenderReport};
