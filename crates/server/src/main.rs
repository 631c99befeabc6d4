//! mailsieve — MCP server for email filter rule validation and simulation.
//!
//! Speaks newline-delimited JSON-RPC over stdio. All logging goes to
//! stderr; stdout carries protocol traffic only.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use mailsieve_mcp::{McpServer, StdioTransport};
use mailsieve_tool_runtime::{
    SimulateEvaluationTool, TestRegexPatternTool, ToolRegistry, ValidateRulesTool,
    ValidateSafeSendersTool,
};

/// MCP server exposing email rule validation and simulation tools.
#[derive(Parser, Debug)]
#[command(name = "mailsieve", version, about)]
struct Cli {
    /// Directory against which relative rule file paths resolve.
    #[arg(long, env = "MAILSIEVE_WORKING_DIR")]
    working_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout is the wire; logs must go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let working_dir = match cli.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    info!(dir = %working_dir.display(), "resolving rule files against working directory");

    let mut registry = ToolRegistry::new();
    registry.register(ValidateRulesTool)?;
    registry.register(ValidateSafeSendersTool)?;
    registry.register(TestRegexPatternTool)?;
    registry.register(SimulateEvaluationTool)?;
    info!(tools = registry.len(), "registered tools");

    let mut server = McpServer::new(registry).with_working_directory(working_dir);
    let mut transport = StdioTransport::new();
    server.run(&mut transport).await?;

    Ok(())
}
