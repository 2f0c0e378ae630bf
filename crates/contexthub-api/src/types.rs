//! Request shape passed to [`ApiClient::execute`](crate::ApiClient::execute).

use reqwest::Method;
use serde_json::Value;

/// One outbound backend request: method, path (with any query string already
/// encoded), and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, e.g. `/v1/prompts?limit=5`.
    pub path: String,
    /// JSON body, when the method carries one.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }

    /// PATCH request with a JSON body.
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PATCH,
            path: path.into(),
            body: Some(body),
        }
    }

    /// PUT request with a JSON body.
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::PUT,
            path: path.into(),
            body: Some(body),
        }
    }

    /// DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::DELETE,
            path: path.into(),
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_set_method_and_body() {
        let req = ApiRequest::get("/v1/prompts");
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_none());

        let req = ApiRequest::post("/v1/prompts", json!({"title": "t"}));
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body.unwrap()["title"], "t");

        let req = ApiRequest::delete("/v1/prompts/p1");
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.path, "/v1/prompts/p1");
    }
}
