//! Resource provider.
//!
//! One static discoverable resource: the backend's capability description.
//! Reading it is the only resource fetch; every other URI is unknown.

use contexthub_api::{ApiClient, ApiRequest};
use contexthub_mcp::{JsonRpcError, ReadResourceResult, ResourceContents, ResourceInfo};
use tokio_util::sync::CancellationToken;

/// URI of the capabilities resource.
pub const CAPABILITIES_URI: &str = "contexthub://capabilities";

/// MIME type of every resource this server provides.
const MIME_TYPE: &str = "application/json";

/// The fixed resource list served by resources/list.
pub fn list() -> Vec<ResourceInfo> {
    vec![ResourceInfo {
        uri: CAPABILITIES_URI.to_string(),
        name: "API Capabilities".to_string(),
        description: Some("View available ContextHub API capabilities".to_string()),
        mime_type: Some(MIME_TYPE.to_string()),
    }]
}

/// Read one resource by URI.
///
/// The capabilities URI fetches `/v1/mcp/capabilities` and returns the full
/// response body; unknown URIs fail locally without any backend call.
pub async fn read(
    api: &ApiClient,
    uri: &str,
    cancel: &CancellationToken,
) -> Result<ReadResourceResult, JsonRpcError> {
    if uri != CAPABILITIES_URI {
        return Err(JsonRpcError::resource_not_found(uri));
    }

    let payload = api
        .execute(&ApiRequest::get("/v1/mcp/capabilities"), cancel)
        .await
        .map_err(|e| JsonRpcError::internal(e.to_string()))?;
    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| JsonRpcError::internal(e.to_string()))?;

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: Some(MIME_TYPE.to_string()),
            text,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> ApiClient {
        ApiClient::builder()
            .base_url(base_url)
            .api_key("ch_test")
            .build()
            .unwrap()
    }

    #[test]
    fn test_list_is_the_single_capabilities_entry() {
        let resources = list();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].uri, "contexthub://capabilities");
        assert_eq!(resources[0].name, "API Capabilities");
        assert_eq!(resources[0].mime_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_read_capabilities_returns_full_body() {
        let server = MockServer::start().await;
        let body = json!({"data": {"tools": 18}, "meta": {"version": "1.0"}});
        Mock::given(method("GET"))
            .and(path("/v1/mcp/capabilities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server.uri());
        let result = read(&api, CAPABILITIES_URI, &Default::default())
            .await
            .unwrap();

        assert_eq!(result.contents.len(), 1);
        assert_eq!(result.contents[0].uri, CAPABILITIES_URI);
        let round_trip: serde_json::Value =
            serde_json::from_str(&result.contents[0].text).unwrap();
        assert_eq!(round_trip, body);
    }

    #[tokio::test]
    async fn test_read_unknown_uri_is_local_error() {
        // An unreachable backend proves no call is attempted.
        let api = client_for("http://127.0.0.1:1");
        let err = read(&api, "contexthub://nope", &Default::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, JsonRpcError::RESOURCE_NOT_FOUND);
        assert_eq!(err.message, "Unknown resource: contexthub://nope");
    }

    #[tokio::test]
    async fn test_read_backend_failure_maps_to_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/mcp/capabilities"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = client_for(&server.uri());
        let err = read(&api, CAPABILITIES_URI, &Default::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, JsonRpcError::INTERNAL_ERROR);
        assert!(err.message.contains("Permission denied"));
    }
}
