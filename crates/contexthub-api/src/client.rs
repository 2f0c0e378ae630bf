//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::{ApiError, Result};
use crate::types::ApiRequest;

/// ContextHub backend API client.
///
/// Holds the fixed base URL and credential header; performs exactly one
/// network call per [`execute`](Self::execute), with no retries. All
/// status-code classification lives here — callers only ever see
/// [`ApiError`] variants or the parsed JSON body.
///
/// # Example
///
/// ```no_run
/// use contexthub_api::ApiClient;
///
/// # async fn example() -> contexthub_api::Result<()> {
/// let client = ApiClient::builder()
///     .base_url("https://api.contexthub.dev")
///     .api_key("ch_secret")
///     .build()?;
///
/// let req = contexthub_api::ApiRequest::get("/v1/prompts");
/// let payload = client.execute(&req, &Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    /// HTTP client carrying the credential and content-type headers.
    http: reqwest::Client,
    /// Base URL, normalized without a trailing slash.
    base_url: String,
    /// Optional per-request timeout. None = the call may hang with the
    /// backend; the caller's invocation hangs with it.
    timeout: Option<Duration>,
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Execute one backend request and classify the outcome.
    ///
    /// The cancellation token is raced against the network call; it is only
    /// ever triggered at server shutdown today, but the hook keeps the call
    /// interruptible.
    pub async fn execute(&self, request: &ApiRequest, cancel: &CancellationToken) -> Result<Value> {
        let url = self.request_url(&request.path)?;

        tracing::debug!(method = %request.method, path = %request.path, "backend request");

        let mut builder = self.inner.http.request(request.method.clone(), url);
        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ApiError::Cancelled),
            result = builder.send() => result.map_err(ApiError::Network)?,
        };

        Self::classify(response).await
    }

    /// Build the absolute request target from the base URL and path.
    ///
    /// Plain concatenation, not `Url::join` — the base URL may carry a path
    /// prefix and the request path always starts with `/v1`.
    fn request_url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.inner.base_url, path)).map_err(ApiError::from)
    }

    /// Map an HTTP response onto the success payload or a typed error.
    async fn classify(response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return Ok(Value::Null);
            }
            let body = response.text().await.map_err(ApiError::Network)?;
            return Ok(serde_json::from_str(&body)?);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Authentication),
            StatusCode::FORBIDDEN => Err(ApiError::Permission),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Api {
                    status: status.as_u16(),
                    message: error_message(status, &body),
                })
            }
        }
    }
}

/// Extract the backend's `error.message` field, falling back to a
/// synthesized `API error: <status> <reason>` line when the body is not
/// JSON or carries no message.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| {
            format!(
                "API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        })
}

/// Builder for creating an [`ApiClient`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL (required).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key (required). Sent as `Authorization: API-Key <key>`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a per-request timeout. Off by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::Config("base_url is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| ApiError::Config("api_key is required".to_string()))?;

        // Validate early; execute() concatenates without re-checking.
        Url::parse(&base_url)?;
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut auth = HeaderValue::from_str(&format!("API-Key {}", api_key))
            .map_err(|_| ApiError::Config("invalid API key".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("contexthub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}
