//! MCP server loop.
//!
//! Reads framed JSON-RPC requests from an input stream, routes them to an
//! [`McpHandler`], and writes responses back. Each request runs as its own
//! task, so responses may be written in completion order rather than arrival
//! order; a dedicated writer task serializes access to the output stream.
//!
//! Notifications (messages without an `id`) are acknowledged by silence.
//! A frame whose body is not valid JSON is skipped; a header-level framing
//! error leaves the stream position unrecoverable and ends the session.
//! A clean EOF on the input stream ends the loop, cancelling any in-flight
//! requests.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, BufWriter};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::{McpError, Result};
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListResourcesResult, ListToolsResult, MCP_PROTOCOL_VERSION,
    ReadResourceParams, ReadResourceResult, ResourceInfo, ResourcesCapability,
    ServerCapabilities, ServerInfo, ToolInfo, ToolsCapability,
};
use crate::transport::{read_message, write_message};

/// Capacity of the response queue between request tasks and the writer.
const RESPONSE_QUEUE_CAPACITY: usize = 32;

/// Domain behavior behind the MCP methods.
///
/// The server owns the channel and the JSON-RPC envelope; implementations
/// own everything the methods mean.
#[async_trait]
pub trait McpHandler: Send + Sync + 'static {
    /// Identity reported by `initialize`.
    fn server_info(&self) -> ServerInfo;

    /// Catalog served by `tools/list`.
    async fn list_tools(&self) -> Vec<ToolInfo>;

    /// Execute one tool invocation.
    ///
    /// Never fails at the protocol level; tool failures are in-band
    /// `isError` results. The token is cancelled when the server shuts down.
    async fn call_tool(&self, params: CallToolParams, cancel: CancellationToken)
    -> CallToolResult;

    /// Catalog served by `resources/list`.
    async fn list_resources(&self) -> Vec<ResourceInfo>;

    /// Read one resource by URI.
    async fn read_resource(
        &self,
        uri: &str,
        cancel: CancellationToken,
    ) -> std::result::Result<ReadResourceResult, JsonRpcError>;
}

/// MCP stdio server.
pub struct McpServer<H> {
    handler: Arc<H>,
}

impl<H: McpHandler> McpServer<H> {
    /// Create a new server around a handler.
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Serve over the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve until the reader reaches end of stream.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut reader = BufReader::new(reader);
        let (tx, mut rx) = mpsc::channel::<Value>(RESPONSE_QUEUE_CAPACITY);

        let writer_task = tokio::spawn(async move {
            let mut writer = BufWriter::new(writer);
            while let Some(message) = rx.recv().await {
                if let Err(e) = write_message(&mut writer, &message).await {
                    tracing::error!(error = %e, "failed to write response");
                    break;
                }
            }
        });

        let cancel = CancellationToken::new();

        let result = loop {
            match read_message(&mut reader).await {
                Ok(Some(message)) => self.dispatch(message, &tx, &cancel),
                Ok(None) => {
                    tracing::info!("input stream closed, shutting down");
                    break Ok(());
                }
                // Framing stays aligned after a bad body; skip the frame.
                Err(McpError::Json(e)) => {
                    tracing::warn!(error = %e, "discarding unparseable message");
                }
                Err(e) => break Err(e),
            }
        };

        // Abort in-flight backend calls, then let queued responses drain.
        cancel.cancel();
        drop(tx);
        let _ = writer_task.await;

        result
    }

    /// Route one inbound message. Requests spawn a task; notifications and
    /// malformed requests are dropped.
    fn dispatch(&self, message: Value, tx: &mpsc::Sender<Value>, cancel: &CancellationToken) {
        if message.get("id").is_none() {
            let method = message
                .get("method")
                .and_then(Value::as_str)
                .unwrap_or("<none>");
            tracing::debug!(method = %method, "ignoring notification");
            return;
        }

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed request");
                return;
            }
        };

        let handler = Arc::clone(&self.handler);
        let tx = tx.clone();
        let cancel = cancel.child_token();
        tokio::spawn(async move {
            let response = route(handler.as_ref(), &request, cancel).await;
            match serde_json::to_value(&response) {
                Ok(value) => {
                    if tx.send(value).await.is_err() {
                        tracing::debug!(id = request.id, "writer gone, response dropped");
                    }
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize response"),
            }
        });
    }
}

/// Handle one request and build its response.
async fn route<H: McpHandler>(
    handler: &H,
    request: &JsonRpcRequest,
    cancel: CancellationToken,
) -> JsonRpcResponse {
    tracing::debug!(id = request.id, method = %request.method, "handling request");

    match request.method.as_str() {
        "initialize" => {
            let result = InitializeResult {
                protocol_version: MCP_PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability::default()),
                    resources: Some(ResourcesCapability::default()),
                },
                server_info: handler.server_info(),
            };
            success(request.id, &result)
        }
        "tools/list" => {
            tracing::debug!("listing tools");
            let result = ListToolsResult {
                tools: handler.list_tools().await,
            };
            success(request.id, &result)
        }
        "tools/call" => match params::<CallToolParams>(request) {
            Ok(params) => {
                tracing::info!(tool = %params.name, "tool called");
                success(request.id, &handler.call_tool(params, cancel).await)
            }
            Err(error) => JsonRpcResponse::error(request.id, error),
        },
        "resources/list" => {
            tracing::debug!("listing resources");
            let result = ListResourcesResult {
                resources: handler.list_resources().await,
            };
            success(request.id, &result)
        }
        "resources/read" => match params::<ReadResourceParams>(request) {
            Ok(params) => {
                tracing::info!(uri = %params.uri, "reading resource");
                match handler.read_resource(&params.uri, cancel).await {
                    Ok(result) => success(request.id, &result),
                    Err(error) => JsonRpcResponse::error(request.id, error),
                }
            }
            Err(error) => JsonRpcResponse::error(request.id, error),
        },
        other => JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(other)),
    }
}

/// Decode typed params, or produce the invalid-params error.
fn params<T: DeserializeOwned>(request: &JsonRpcRequest) -> std::result::Result<T, JsonRpcError> {
    let value = request.params.clone().unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

/// Serialize a result payload into a success response.
fn success<T: Serialize>(id: u64, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            JsonRpcError::internal(format!("failed to serialize result: {}", e)),
        ),
    }
}
