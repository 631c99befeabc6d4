//! Domain tool implementations wrapping the rule engine.
//!
//! Four tools, mirroring the engine's public operations:
//! - `validate_rules_yaml` — schema + pattern validation of a rules file
//! - `validate_safe_senders` — validation of the allow-list file
//! - `test_regex_pattern` — pattern analysis, sample matching, optional
//!   performance probe
//! - `simulate_rule_evaluation` — full evaluation of a candidate email

pub mod simulate;
pub mod test_pattern;
pub mod validate_rules;
pub mod validate_safe_senders;

pub use simulate::SimulateEvaluationTool;
pub use test_pattern::TestRegexPatternTool;
pub use validate_rules::ValidateRulesTool;
pub use validate_safe_senders::ValidateSafeSendersTool;
