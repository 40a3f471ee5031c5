// Standalone Windy MCP server binary

use anyhow::Result;
use std::time::Duration;
use windy_mcp::server::McpServer;
use windy_mcp::tools::{http_client, ToolRegistry};
use windy_mcp::Credentials;

/// Outbound HTTP timeout; overridable for slow upstreams.
const TIMEOUT_VAR: &str = "WINDY_HTTP_TIMEOUT_SECS";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is the protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let credentials = Credentials::from_env()?;

    let timeout_secs = std::env::var(TIMEOUT_VAR)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let client = http_client(Duration::from_secs(timeout_secs))?;

    let registry = ToolRegistry::windy(client);
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry, credentials);
    server.run().await
}
