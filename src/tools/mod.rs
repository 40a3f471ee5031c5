// Windy tool implementations and the registry that dispatches to them.

pub mod forecast;
pub mod map_link;
pub mod webcams;

pub use forecast::ForecastTool;
pub use map_link::MapLinkTool;
pub use webcams::WebcamsTool;

use crate::args::ValidatedArgs;
use crate::catalog::ToolDescriptor;
use crate::config::Credentials;
use crate::error::CallError;
use crate::protocol::{CallToolResult, ToolSchema};
use std::sync::Arc;
use std::time::Duration;

/// Default base for the Windy HTTP API. Tools take the base as a parameter
/// so tests can point them at a local mock server.
pub const DEFAULT_API_BASE: &str = "https://api.windy.com";

/// One tool strategy: a static descriptor plus the remote-call logic that
/// runs once arguments have been validated against that descriptor.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// The tool's catalog entry.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Execute with validated arguments and the per-call credential set.
    async fn call(
        &self,
        args: ValidatedArgs,
        credentials: &Credentials,
    ) -> Result<CallToolResult, CallError>;
}

/// Registry of available tools, listed in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry with the full Windy tool set against the production API.
    pub fn windy(client: reqwest::Client) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ForecastTool::new(client.clone())));
        registry.register(Arc::new(WebcamsTool::new(client)));
        registry.register(Arc::new(MapLinkTool::new()));
        registry
    }

    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) {
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools
            .iter()
            .find(|t| t.descriptor().name == name)
            .cloned()
    }

    /// All tool schemas, stable across calls.
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.descriptor().to_schema()).collect()
    }

    /// Route one tool call: look up the tool, validate arguments against its
    /// descriptor, then run its strategy. Stateless; never retries.
    pub async fn dispatch(
        &self,
        name: &str,
        raw_args: &serde_json::Value,
        credentials: &Credentials,
    ) -> Result<CallToolResult, CallError> {
        let tool = self
            .get(name)
            .ok_or_else(|| CallError::UnknownTool(name.to_string()))?;
        let args = crate::args::validate(tool.descriptor(), raw_args)?;
        tool.call(args, credentials).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared HTTP client for all outbound Windy calls. The timeout is the only
/// policy the core imposes; callers pick it.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("windy-mcp/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
}

/// Pretty-print a raw response body when it is JSON, otherwise pass it
/// through unchanged.
pub(crate) fn pretty_body(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}
