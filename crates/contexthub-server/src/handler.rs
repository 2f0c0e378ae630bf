//! The MCP handler: where the channel meets the domain.
//!
//! Every tool invocation funnels through [`ContextHub::call_tool`], which is
//! the single rendering step — success text becomes one content block,
//! any error (local or backend) becomes one `Error: <message>` block with
//! `isError` set. `call_tool` never fails at the protocol level.

use async_trait::async_trait;
use contexthub_api::ApiClient;
use contexthub_mcp::{
    CallToolParams, CallToolResult, JsonRpcError, McpHandler, ReadResourceResult, ResourceInfo,
    ServerInfo, ToolInfo,
};
use tokio_util::sync::CancellationToken;

use crate::{dispatch, resources, tools};

/// The ContextHub MCP server behavior.
pub struct ContextHub {
    api: ApiClient,
}

impl ContextHub {
    /// Create a handler around a configured API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl McpHandler for ContextHub {
    fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: "contexthub".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    async fn list_tools(&self) -> Vec<ToolInfo> {
        tools::catalog()
    }

    async fn call_tool(
        &self,
        params: CallToolParams,
        cancel: CancellationToken,
    ) -> CallToolResult {
        match dispatch::invoke(&self.api, &params.name, params.arguments, &cancel).await {
            Ok(text) => CallToolResult::success(text),
            Err(e) => {
                tracing::warn!(tool = %params.name, error = %e, "tool invocation failed");
                CallToolResult::error(format!("Error: {}", e))
            }
        }
    }

    async fn list_resources(&self) -> Vec<ResourceInfo> {
        resources::list()
    }

    async fn read_resource(
        &self,
        uri: &str,
        cancel: CancellationToken,
    ) -> Result<ReadResourceResult, JsonRpcError> {
        resources::read(&self.api, uri, &cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn handler_for(base_url: &str) -> ContextHub {
        ContextHub::new(
            ApiClient::builder()
                .base_url(base_url)
                .api_key("ch_test")
                .build()
                .unwrap(),
        )
    }

    fn call(name: &str, arguments: serde_json::Value) -> CallToolParams {
        CallToolParams {
            name: name.to_string(),
            arguments: Some(arguments),
        }
    }

    #[test]
    fn test_server_info() {
        let info = handler_for("http://127.0.0.1:1").server_info();
        assert_eq!(info.name, "contexthub");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_list_tools_serves_the_catalog() {
        let tools = handler_for("http://127.0.0.1:1").list_tools().await;
        assert_eq!(tools.len(), 18);
        assert_eq!(tools[0].name, "list_prompts");
    }

    #[tokio::test]
    async fn test_call_tool_success_has_no_error_flag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/prompts/p1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": {"_id": "p1", "title": "One"}})),
            )
            .mount(&server)
            .await;

        let result = handler_for(&server.uri())
            .call_tool(call("get_prompt", json!({"promptId": "p1"})), Default::default())
            .await;

        assert!(!result.is_error());
        assert!(result.text().unwrap().contains("\"title\": \"One\""));
    }

    #[tokio::test]
    async fn test_call_tool_backend_error_is_in_band() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/prompts/p1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = handler_for(&server.uri())
            .call_tool(call("get_prompt", json!({"promptId": "p1"})), Default::default())
            .await;

        assert!(result.is_error());
        assert_eq!(
            result.text().unwrap(),
            "Error: Resource not found. Check that the ID is correct."
        );
    }

    #[tokio::test]
    async fn test_call_tool_unknown_name_makes_no_backend_call() {
        // An unreachable backend: a network error here would leak into the
        // message, an unknown-tool error proves nothing was attempted.
        let result = handler_for("http://127.0.0.1:1")
            .call_tool(call("frobnicate", json!({})), Default::default())
            .await;

        assert!(result.is_error());
        assert_eq!(result.text().unwrap(), "Error: Unknown tool: frobnicate");
    }

    #[tokio::test]
    async fn test_list_resources() {
        let resources = handler_for("http://127.0.0.1:1").list_resources().await;
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].uri, "contexthub://capabilities");
    }

    #[tokio::test]
    async fn test_read_resource_unknown_uri() {
        let err = handler_for("http://127.0.0.1:1")
            .read_resource("contexthub://other", Default::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, JsonRpcError::RESOURCE_NOT_FOUND);
    }
}
