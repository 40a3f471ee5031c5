// MCP server exposing Windy.com weather tools (point forecasts, webcam
// search, map links) to agent clients over JSON-RPC on stdio.

pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::Credentials;
pub use error::{ArgumentError, CallError};
pub use server::McpServer;
