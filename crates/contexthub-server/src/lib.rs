//! Domain layer of the ContextHub MCP server.
//!
//! This crate owns everything the MCP methods *mean*: the tool catalog, the
//! dispatcher that turns one invocation into backend HTTP work and rendered
//! text, and the resource provider.
//!
//! # Architecture
//!
//! ```text
//! tools/call ──▶ dispatch::invoke
//!                  │  tools::find(name)          (catalog lookup)
//!                  │  (spec.build)(&args)        (ToolArgs → RequestPlan)
//!                  │  ApiClient::execute         (1 call, +1 follow-up)
//!                  ▼  (spec.render)(&args, …)    (payload → text)
//!            ContextHub::call_tool               (one uniform ToolResult)
//! ```
//!
//! Each catalog entry is a [`dispatch::ToolSpec`] pairing a request-builder
//! function with a response-renderer function; both are pure, so every
//! operation is testable without a network. The only state anywhere is the
//! immutable `static` catalog and the [`ApiClient`](contexthub_api::ApiClient)
//! configuration.

pub mod args;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod resources;
pub mod tools;

pub use args::ToolArgs;
pub use dispatch::{RequestPlan, Responses, ToolSpec, invoke};
pub use error::{Result, ToolError};
pub use handler::ContextHub;
pub use tools::TOOLS;
