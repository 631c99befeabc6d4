//! MCP (Model Context Protocol) host surface for the rule engine.
//!
//! Implements MCP over JSON-RPC 2.0 with newline-delimited JSON framing,
//! exposing a `ToolRegistry` to MCP clients.
//!
//! # Architecture
//!
//! - **protocol**: JSON-RPC 2.0 and MCP wire types
//! - **transport**: pluggable framing (stdio for production, in-memory
//!   channels for tests)
//! - **server**: the request loop dispatching to registered tools
//! - **error**: unified error types

pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use error::McpError;
pub use protocol::*;
pub use server::McpServer;
pub use transport::{ChannelTransport, StdioTransport, Transport};
