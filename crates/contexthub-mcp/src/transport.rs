//! Stdio framing for MCP messages.
//!
//! Messages are framed with Content-Length headers:
//!
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! {"jsonrpc": "2.0", ...}
//! ```
//!
//! The reader tolerates bare-LF header lines and unknown header fields.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{McpError, Result};

/// Read one framed JSON message.
///
/// Returns `Ok(None)` on a clean end of stream (EOF before any header byte
/// of the next message). EOF inside a message is a [`McpError::ConnectionClosed`].
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Value>>
where
    R: AsyncBufRead + Unpin,
{
    let mut content_length: Option<usize> = None;
    let mut line = String::new();
    let mut mid_message = false;

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            return if mid_message {
                Err(McpError::ConnectionClosed)
            } else {
                Ok(None)
            };
        }
        mid_message = true;

        let trimmed = line.trim();

        // Empty line signals end of headers
        if trimmed.is_empty() {
            break;
        }

        if let Some(len_str) = trimmed.strip_prefix("Content-Length:") {
            content_length = Some(len_str.trim().parse().map_err(|e| {
                McpError::protocol(format!("invalid Content-Length: {}", e))
            })?);
        }
    }

    let content_length =
        content_length.ok_or_else(|| McpError::protocol("missing Content-Length header"))?;

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;

    let json = String::from_utf8(body)
        .map_err(|e| McpError::protocol(format!("invalid UTF-8 in message: {}", e)))?;

    tracing::trace!(content_length, json = %json, "received message");

    Ok(Some(serde_json::from_str(&json)?))
}

/// Write one framed JSON message and flush.
pub async fn write_message<W>(writer: &mut W, message: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(message)?;

    writer
        .write_all(format!("Content-Length: {}\r\n\r\n", json.len()).as_bytes())
        .await?;
    writer.write_all(json.as_bytes()).await?;
    writer.flush().await?;

    tracing::trace!(content_length = json.len(), json = %json, "sent message");

    Ok(())
}
