//! Typed document model with lenient serde deserialization.
//!
//! Defines the type hierarchy for the two human-edited YAML documents:
//! - `RuleDocument`: ordered list of named filter rules
//! - `SafeSenderDocument`: allow-list of sender patterns
//!
//! plus `Message`, the candidate email an evaluation runs against.
//!
//! Deserialization is deliberately forgiving: legacy exports encode
//! booleans as strings, write single patterns as bare scalars, and carry
//! extra keys. Malformed optional fields collapse to their defaults here;
//! the strict structural checks live in [`crate::validation`].

mod message;
mod rules;
mod safe_senders;

pub use message::*;
pub use rules::*;
pub use safe_senders::*;
