// MCP server: JSON-RPC 2.0 over stdio, one line per message.
//
// The dispatcher core returns tagged results; this boundary decides how each
// failure class is rendered. Structurally-known failures (unknown tool, bad
// arguments, missing credential, webcam fallback exhaustion) become typed
// JSON-RPC errors. Single remote-call failures are rendered as a
// successful-shaped result whose text starts with "Error: ", so agent
// clients see them as readable tool output rather than a protocol fault.

use crate::config::Credentials;
use crate::error::CallError;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolContent,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub const SERVER_NAME: &str = "windy-mcp-server";

pub struct McpServer {
    registry: ToolRegistry,
    credentials: Credentials,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, credentials: Credentials) -> Self {
        Self {
            registry,
            credentials,
        }
    }

    /// Serve requests from stdin until EOF. Logging goes to stderr so stdout
    /// stays a clean protocol channel. No single call's outcome ever ends
    /// the loop.
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        tracing::info!("Windy MCP Server running on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            stdout.write_all(payload.as_bytes()).await?;
            stdout.flush().await?;
        }

        Ok(())
    }

    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(error) => {
                tracing::warn!(%error, "unparseable request line");
                Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(),
                ))
            }
        }
    }

    /// Handle a single request. Returns None for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => {
                let params: CallToolParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(error) => {
                            return Some(JsonRpcResponse::error(
                                id,
                                JsonRpcError::invalid_params(format!(
                                    "Invalid tool call params: {error}"
                                )),
                            ));
                        }
                    };
                self.call_tool(id, params).await
            }
            other => JsonRpcResponse::error(
                id,
                JsonRpcError::method_not_found(format!("Method not found: {other}")),
            ),
        };

        Some(response)
    }

    async fn call_tool(&self, id: Value, params: CallToolParams) -> JsonRpcResponse {
        tracing::debug!(tool = %params.name, "dispatching tool call");
        match self
            .registry
            .dispatch(&params.name, &params.arguments, &self.credentials)
            .await
        {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => render_failure(id, error),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

fn render_failure(id: Value, error: CallError) -> JsonRpcResponse {
    match error {
        CallError::UnknownTool(_) => {
            JsonRpcResponse::error(id, JsonRpcError::method_not_found(error.to_string()))
        }
        CallError::InvalidArguments(_) => {
            JsonRpcResponse::error(id, JsonRpcError::invalid_params(error.to_string()))
        }
        CallError::CredentialNotConfigured { .. } => {
            JsonRpcResponse::error(id, JsonRpcError::invalid_request(error.to_string()))
        }
        CallError::WebcamsUnavailable { .. } => {
            JsonRpcResponse::error(id, JsonRpcError::internal_error(error.to_string()))
        }
        CallError::Remote(detail) => JsonRpcResponse::success(
            id,
            CallToolResult {
                content: vec![ToolContent::error(detail)],
                is_error: Some(true),
            },
        ),
    }
}
