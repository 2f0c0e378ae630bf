//! Error types for tool dispatch.

use contexthub_api::ApiError;
use thiserror::Error;

/// Result type for tool dispatch.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error produced while dispatching one tool invocation.
///
/// Every variant's display text is caller-facing: the handler renders it
/// verbatim after an `Error: ` prefix, so messages carry no internal detail.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The invoked name is not in the catalog. No backend call is made.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An argument the operation cannot be built without is absent.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The backend answered with a shape the renderer cannot format.
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    /// JSON formatting error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend call failed; the classified message passes through.
    #[error(transparent)]
    Api(#[from] ApiError),
}
