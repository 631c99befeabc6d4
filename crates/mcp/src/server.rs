//! MCP server: bridges a `ToolRegistry` to MCP clients.
//!
//! One request, one response; malformed lines and unknown names fail
//! only their own request and never the serve loop.

use serde_json::Value;
use std::path::PathBuf;

use mailsieve_tool_runtime::{ToolContext, ToolRegistry};

use crate::error::McpError;
use crate::protocol::*;
use crate::transport::Transport;

/// MCP server wrapping a tool registry.
pub struct McpServer {
    registry: ToolRegistry,
    server_name: String,
    server_version: String,
    working_directory: PathBuf,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_name: "mailsieve".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            working_directory: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
        }
    }

    /// Set the server name advertised during initialization.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Set the directory against which tool file paths resolve.
    pub fn with_working_directory(mut self, dir: PathBuf) -> Self {
        self.working_directory = dir;
        self
    }

    /// Run the serve loop until the transport closes.
    pub async fn run<T: Transport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        tracing::info!(server = %self.server_name, "MCP server starting");

        while let Some(line) = transport.receive().await? {
            tracing::debug!(message = %line, "received message");

            // Requests carry an "id"; notifications do not. Parse as a
            // generic value first to tell them apart.
            let raw: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse JSON line");
                    self.send_parse_error(transport, e).await?;
                    continue;
                }
            };

            if raw.get("id").is_none() {
                if let Ok(notification) = serde_json::from_value::<Notification>(raw) {
                    self.handle_notification(&notification);
                }
                continue;
            }

            let request: Request = match serde_json::from_value(raw) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse JSON-RPC request");
                    self.send_parse_error(transport, e).await?;
                    continue;
                }
            };

            let response = self.handle_request(&request).await;
            let json = serde_json::to_string(&response)?;
            tracing::debug!(response = %json, "sending response");
            transport.send(&json).await?;
        }

        tracing::info!("transport closed, shutting down");
        Ok(())
    }

    async fn send_parse_error<T: Transport>(
        &self,
        transport: &mut T,
        error: serde_json::Error,
    ) -> Result<(), McpError> {
        // The request id is unreadable, so the response carries null.
        let rpc_error = McpError::JsonParse(error).to_rpc_error();
        let response = Response {
            jsonrpc: "2.0".to_string(),
            id: RequestId::Null,
            result: None,
            error: Some(rpc_error),
        };
        transport.send(&serde_json::to_string(&response)?).await
    }

    /// Handle a single JSON-RPC request and produce a response.
    pub async fn handle_request(&mut self, request: &Request) -> Response {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_list_tools(id),
            "tools/call" => self.handle_call_tool(id, &request.params).await,
            method => {
                tracing::warn!(method = %method, "unknown method");
                let err = McpError::MethodNotFound(method.to_string());
                Response::failure(id, err.to_rpc_error().code, err.to_string())
            }
        }
    }

    fn handle_notification(&self, notification: &Notification) {
        match notification.method.as_str() {
            "notifications/initialized" => {
                tracing::info!("client confirmed initialization");
            }
            "notifications/cancelled" => {
                tracing::debug!("client cancelled a request");
            }
            method => {
                tracing::debug!(method = %method, "ignoring unknown notification");
            }
        }
    }

    fn handle_initialize(&self, id: RequestId) -> Response {
        tracing::info!("handling initialize");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: Some(self.server_version.clone()),
            },
        };

        self.to_success(id, result)
    }

    fn handle_list_tools(&self, id: RequestId) -> Response {
        tracing::debug!("handling tools/list");

        let tools: Vec<ToolInfo> = self
            .registry
            .list()
            .into_iter()
            .map(ToolInfo::from)
            .collect();

        self.to_success(id, ListToolsResult { tools })
    }

    async fn handle_call_tool(&self, id: RequestId, params: &Option<Value>) -> Response {
        let params = match params {
            Some(p) => p.clone(),
            None => {
                let err = McpError::InvalidParams("missing params".to_string());
                return Response::failure(id, err.to_rpc_error().code, err.to_string());
            }
        };

        let call: CallToolParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                let err = McpError::InvalidParams(e.to_string());
                return Response::failure(id, err.to_rpc_error().code, err.to_string());
            }
        };

        tracing::debug!(tool = %call.name, "handling tools/call");

        let Some(tool) = self.registry.get(&call.name) else {
            let err = McpError::ToolNotFound(call.name.clone());
            return Response::failure(id, err.to_rpc_error().code, err.to_string());
        };

        let ctx = ToolContext {
            working_directory: self.working_directory.clone(),
        };

        // Tool failures become error-flagged results, not RPC errors:
        // the call itself succeeded.
        let result = match tool.execute(call.arguments, &ctx).await {
            Ok(output) => CallToolResult {
                content: vec![ToolContent::Text {
                    text: output.content,
                }],
                is_error: output.is_error,
            },
            Err(e) => CallToolResult {
                content: vec![ToolContent::Text {
                    text: e.to_string(),
                }],
                is_error: true,
            },
        };

        self.to_success(id, result)
    }

    fn to_success<S: serde::Serialize>(&self, id: RequestId, result: S) -> Response {
        match serde_json::to_value(result) {
            Ok(value) => Response::success(id, value),
            Err(e) => {
                let err = McpError::JsonParse(e);
                Response::failure(id, err.to_rpc_error().code, err.to_string())
            }
        }
    }
}
