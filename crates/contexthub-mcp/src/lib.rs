//! MCP (Model Context Protocol) server plumbing for ContextHub.
//!
//! This crate owns the channel side of the server: JSON-RPC 2.0 message
//! types, Content-Length framing over stdio, and the serve loop that routes
//! requests to a domain handler.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  McpServer                                                  │
//! │  - Routes initialize, tools/list, tools/call,               │
//! │    resources/list, resources/read                           │
//! │  - Task per request; writer task serializes output          │
//! └─────────────────────────────────────────────────────────────┘
//!                           │ McpHandler (trait)
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain handler (contexthub-server)                         │
//! │  - Tool catalog, dispatch, resource provider                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Wire format
//!
//! MCP uses JSON-RPC 2.0 over stdio with Content-Length framing:
//!
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! {"jsonrpc": "2.0", "id": 1, "method": "...", "params": {...}}
//! ```
//!
//! Requests carry an `id` and get exactly one response; notifications carry
//! no `id` and get none. The loop ends at EOF on the input stream.

pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

// Re-export main types
pub use error::{McpError, Result};
pub use protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, ListResourcesResult, ListToolsResult, MCP_PROTOCOL_VERSION,
    ReadResourceParams, ReadResourceResult, ResourceContents, ResourceInfo, ResourcesCapability,
    ServerCapabilities, ServerInfo, ToolContent, ToolInfo, ToolsCapability,
};
pub use server::{McpHandler, McpServer};
pub use transport::{read_message, write_message};
