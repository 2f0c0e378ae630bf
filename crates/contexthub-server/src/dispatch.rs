//! Tool dispatch.
//!
//! Each catalog entry is a [`ToolSpec`]: a pair of pure functions that turn
//! an argument record into a [`RequestPlan`] and the backend's responses into
//! the rendered result text. [`invoke`] is the only place the plan meets the
//! network, so every operation stays unit-testable without HTTP.

use contexthub_api::{ApiClient, ApiRequest};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::args::ToolArgs;
use crate::error::{Result, ToolError};
use crate::tools;

/// One catalog entry: discovery metadata plus the operation's two halves.
#[derive(Clone, Copy)]
pub struct ToolSpec {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description served by tools/list.
    pub description: &'static str,
    /// JSON Schema for the tool's arguments.
    pub schema: fn() -> Value,
    /// Derive the HTTP work from the arguments.
    pub build: fn(&ToolArgs) -> Result<RequestPlan>,
    /// Render the backend responses into result text.
    pub render: fn(&ToolArgs, &Responses) -> Result<String>,
}

/// The HTTP work of one invocation: a primary request and at most one
/// follow-up. Both derive from the arguments alone, never from the first
/// response.
#[derive(Debug, Clone)]
pub struct RequestPlan {
    /// The request every operation makes.
    pub primary: ApiRequest,
    /// Sequential second request (items-inclusive collection fetch only).
    pub follow_up: Option<ApiRequest>,
}

impl RequestPlan {
    /// A plan with just the primary request.
    pub fn single(primary: ApiRequest) -> Self {
        Self {
            primary,
            follow_up: None,
        }
    }

    /// A plan with a follow-up request after the primary.
    pub fn with_follow_up(primary: ApiRequest, follow_up: ApiRequest) -> Self {
        Self {
            primary,
            follow_up: Some(follow_up),
        }
    }
}

/// Parsed response payloads of an executed [`RequestPlan`], same order.
#[derive(Debug, Clone)]
pub struct Responses {
    /// Payload of the primary request.
    pub primary: Value,
    /// Payload of the follow-up request, when the plan had one.
    pub follow_up: Option<Value>,
}

impl Responses {
    /// Responses of a single-request plan.
    pub fn single(primary: Value) -> Self {
        Self {
            primary,
            follow_up: None,
        }
    }
}

/// Execute one tool invocation end to end.
///
/// Unknown names fail before any network traffic. The requests of the plan
/// run sequentially; the first failure aborts the invocation.
pub async fn invoke(
    api: &ApiClient,
    name: &str,
    arguments: Option<Value>,
    cancel: &CancellationToken,
) -> Result<String> {
    let spec = tools::find(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    let args = ToolArgs::new(arguments);

    let plan = (spec.build)(&args)?;

    let primary = api.execute(&plan.primary, cancel).await?;
    let follow_up = match &plan.follow_up {
        Some(request) => Some(api.execute(request, cancel).await?),
        None => None,
    };

    (spec.render)(&args, &Responses { primary, follow_up })
}
