//! Client error types.
//!
//! Every non-2xx backend status maps onto exactly one variant; the dispatcher
//! renders the variant's `Display` text to the caller unchanged, so the
//! messages here are the caller-facing contract.

use thiserror::Error;

/// Error type for backend API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, TLS, broken body stream).
    #[error("Network error: Unable to reach API. Check your internet connection.")]
    Network(#[source] reqwest::Error),

    /// HTTP 401.
    #[error("Authentication failed. Check your API key.")]
    Authentication,

    /// HTTP 403.
    #[error("Permission denied. Your API key may not have the required permissions.")]
    Permission,

    /// HTTP 404.
    #[error("Resource not found. Check that the ID is correct.")]
    NotFound,

    /// HTTP 429.
    #[error("Rate limit exceeded. Please wait a moment before retrying.")]
    RateLimited,

    /// Any other non-success status. The message is the backend's
    /// `error.message` field when the body carries one, otherwise a
    /// synthesized `API error: <status> <reason>` line.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable error message.
        message: String,
    },

    /// URL construction failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A 2xx response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The invocation was cancelled before the call completed.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Authentication)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited)
    }
}

/// Result type for backend API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
