//! Tool runtime: the `Tool` trait, registry, and the domain tools that
//! expose the rule engine as named, schema-described operations.
//!
//! Each tool takes a JSON input validated against its advertised schema
//! and returns a JSON text result. File-access and parse failures become
//! error-flagged results rather than transport errors, so one bad call
//! never takes down the host loop.

pub mod registry;
pub mod tool;
pub mod tools;

pub use registry::{RegistryError, ToolRegistry};
pub use tool::{EchoTool, Tool, ToolContext, ToolDefinition, ToolError, ToolResult};
pub use tools::{
    SimulateEvaluationTool, TestRegexPatternTool, ValidateRulesTool, ValidateSafeSendersTool,
};
