//! HTTP client for the ContextHub backend API.
//!
//! This crate provides a thin typed wrapper around the ContextHub REST
//! API. It owns the credential header, URL construction, and the mapping
//! from HTTP status codes onto [`ApiError`] variants; it deliberately does
//! not interpret response payloads beyond parsing them as JSON.
//!
//! # Example
//!
//! ```no_run
//! use contexthub_api::{ApiClient, ApiRequest};
//!
//! # async fn example() -> contexthub_api::Result<()> {
//! let client = ApiClient::builder()
//!     .base_url(contexthub_api::DEFAULT_API_URL)
//!     .api_key("ch_secret")
//!     .build()?;
//!
//! let payload = client
//!     .execute(&ApiRequest::get("/v1/prompts?limit=5"), &Default::default())
//!     .await?;
//! println!("{payload}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, ClientBuilder};
pub use error::{ApiError, Result};
pub use types::ApiRequest;

/// Default ContextHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.contexthub.dev";
