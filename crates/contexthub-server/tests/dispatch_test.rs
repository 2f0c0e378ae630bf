//! End-to-end dispatch tests against a fake backend.
//!
//! Every catalog operation is invoked with a minimal argument set and
//! checked for the exact outbound method, path, and query string; the
//! cross-cutting contracts (partial updates, error surfacing, idempotent
//! rendering) get their own tests.

use contexthub_api::ApiClient;
use contexthub_server::{ToolError, invoke};
use serde_json::{Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::builder()
        .base_url(server.uri())
        .api_key("ch_test")
        .build()
        .unwrap()
}

async fn run(server: &MockServer, tool: &str, args: Value) -> Result<String, ToolError> {
    invoke(&client_for(server), tool, Some(args), &Default::default()).await
}

/// One catalog operation with its minimal arguments and wire expectations.
struct Case {
    tool: &'static str,
    args: Value,
    method: &'static str,
    path: &'static str,
    query: &'static str,
    response: Value,
}

#[tokio::test]
async fn test_every_operation_makes_one_documented_call() {
    let cases = vec![
        Case {
            tool: "list_prompts",
            args: json!({}),
            method: "GET",
            path: "/v1/prompts",
            query: "",
            response: json!({"data": []}),
        },
        Case {
            tool: "get_prompt",
            args: json!({"promptId": "p1"}),
            method: "GET",
            path: "/v1/prompts/p1",
            query: "",
            response: json!({"data": {"_id": "p1"}}),
        },
        Case {
            tool: "create_prompt",
            args: json!({"title": "T", "description": "D", "content": "C", "engine": "gpt-4"}),
            method: "POST",
            path: "/v1/prompts",
            query: "",
            response: json!({"data": {"_id": "p1"}}),
        },
        Case {
            tool: "update_prompt",
            args: json!({"promptId": "p1", "title": "T"}),
            method: "PATCH",
            path: "/v1/prompts/p1",
            query: "",
            response: json!({"data": {"title": "T", "currentVersion": 2}}),
        },
        Case {
            tool: "delete_prompt",
            args: json!({"promptId": "p1"}),
            method: "DELETE",
            path: "/v1/prompts/p1",
            query: "",
            response: Value::Null,
        },
        Case {
            tool: "list_collections",
            args: json!({"search": "work"}),
            method: "GET",
            path: "/v1/collections",
            query: "search=work",
            response: json!({"data": []}),
        },
        Case {
            tool: "get_collection",
            args: json!({"collectionId": "c1"}),
            method: "GET",
            path: "/v1/collections/c1",
            query: "",
            response: json!({"data": {"id": "c1"}}),
        },
        Case {
            tool: "create_collection",
            args: json!({"name": "Work"}),
            method: "POST",
            path: "/v1/collections",
            query: "",
            response: json!({"data": {"_id": "c1"}}),
        },
        Case {
            tool: "update_collection",
            args: json!({"collectionId": "c1", "name": "Play"}),
            method: "PATCH",
            path: "/v1/collections/c1",
            query: "",
            response: json!({"data": {"name": "Play"}}),
        },
        Case {
            tool: "delete_collection",
            args: json!({"collectionId": "c1"}),
            method: "DELETE",
            path: "/v1/collections/c1",
            query: "",
            response: Value::Null,
        },
        Case {
            tool: "add_to_collection",
            args: json!({"collectionId": "c1", "itemIds": ["d1"], "itemType": "document"}),
            method: "POST",
            path: "/v1/collections/c1/items",
            query: "",
            response: json!({"data": {"added": 1, "alreadyInCollection": 0}}),
        },
        Case {
            tool: "remove_from_collection",
            args: json!({"collectionId": "c1", "itemIds": ["d1"], "itemType": "document"}),
            method: "PUT",
            path: "/v1/collections/c1/items",
            query: "",
            response: json!({"data": {"removed": 1}}),
        },
        Case {
            tool: "list_documents",
            args: json!({"collectionId": "c1", "limit": 5}),
            method: "GET",
            path: "/v1/documents",
            query: "collectionId=c1&limit=5",
            response: json!({"data": []}),
        },
        Case {
            tool: "get_document",
            args: json!({"documentId": "d1"}),
            method: "GET",
            path: "/v1/documents/d1",
            query: "",
            response: json!({"data": {"id": "d1"}}),
        },
        Case {
            tool: "create_document",
            args: json!({"title": "T", "content": "C"}),
            method: "POST",
            path: "/v1/documents",
            query: "",
            response: json!({"data": {"_id": "d1"}}),
        },
        Case {
            tool: "update_document",
            args: json!({"documentId": "d1", "title": "T"}),
            method: "PATCH",
            path: "/v1/documents/d1",
            query: "",
            response: json!({"data": {"title": "T"}}),
        },
        Case {
            tool: "delete_document",
            args: json!({"documentId": "d1"}),
            method: "DELETE",
            path: "/v1/documents/d1",
            query: "",
            response: Value::Null,
        },
        Case {
            tool: "search_contexthub",
            args: json!({"query": "alpha"}),
            method: "GET",
            path: "/v1/search",
            query: "q=alpha",
            response: json!({"data": {}}),
        },
    ];

    for case in cases {
        let server = MockServer::start().await;
        let status = if case.response.is_null() { 204 } else { 200 };
        let mut template = ResponseTemplate::new(status);
        if status == 200 {
            template = template.set_body_json(&case.response);
        }
        Mock::given(any()).respond_with(template).mount(&server).await;

        run(&server, case.tool, case.args)
            .await
            .unwrap_or_else(|e| panic!("{} failed: {}", case.tool, e));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "{} call count", case.tool);
        assert_eq!(requests[0].method.as_str(), case.method, "{}", case.tool);
        assert_eq!(requests[0].url.path(), case.path, "{}", case.tool);
        assert_eq!(
            requests[0].url.query().unwrap_or(""),
            case.query,
            "{}",
            case.tool
        );
    }
}

#[tokio::test]
async fn test_unknown_tool_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = run(&server, "frobnicate", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(_)));
    assert_eq!(err.to_string(), "Unknown tool: frobnicate");
}

#[tokio::test]
async fn test_missing_id_makes_no_calls() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = run(&server, "get_prompt", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::MissingArgument("promptId")));
}

#[tokio::test]
async fn test_update_body_is_arguments_minus_id() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"title": "y", "currentVersion": 2}})),
        )
        .mount(&server)
        .await;

    run(&server, "update_prompt", json!({"promptId": "x", "title": "y"}))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({"title": "y"}));
}

#[tokio::test]
async fn test_list_rendering_is_a_reduced_summary_per_element() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"_id": "p1", "title": "One", "description": "d", "engine": "gpt-4", "content": "full", "ownerId": "u1"},
            {"_id": "p2", "title": "Two", "description": "d", "engine": "gpt-4", "content": "full", "ownerId": "u1"},
            {"_id": "p3", "title": "Three", "description": "d", "engine": "gpt-4", "content": "full", "ownerId": "u1"}
        ]})))
        .mount(&server)
        .await;

    let text = run(&server, "list_prompts", json!({})).await.unwrap();
    let summaries: Vec<Value> = serde_json::from_str(&text).unwrap();

    assert_eq!(summaries.len(), 3);
    for summary in &summaries {
        let keys: Vec<_> = summary.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["id", "title", "description", "engine"]);
    }
}

#[tokio::test]
async fn test_collection_fetch_with_items_is_two_sequential_calls() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::path("/v1/collections/c1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "c1", "name": "Work"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(wiremock::matchers::path("/v1/collections/c1/items"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": "d1"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = run(
        &server,
        "get_collection",
        json!({"collectionId": "c1", "includeItems": true}),
    )
    .await
    .unwrap();

    let rendered: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rendered["items"], json!([{"id": "d1"}]));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.query().unwrap_or(""), "limit=50");
}

#[tokio::test]
async fn test_search_semantic_parameter_rules() {
    for (args, expected_query) in [
        (json!({"query": "x"}), "q=x"),
        (json!({"query": "x", "semantic": true}), "q=x"),
        (json!({"query": "x", "semantic": false}), "q=x&semantic=false"),
    ] {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        run(&server, "search_contexthub", args).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query().unwrap(), expected_query);
    }
}

#[tokio::test]
async fn test_search_empty_payload_renders_no_results_literal() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"prompts": [], "documents": [], "collections": []}}),
        ))
        .mount(&server)
        .await;

    let text = run(&server, "search_contexthub", json!({"query": "nothing here"}))
        .await
        .unwrap();
    assert_eq!(text, "No results found for \"nothing here\".");
}

#[tokio::test]
async fn test_backend_error_statuses_surface_classified_messages() {
    for (status, expected) in [
        (401, "Authentication failed. Check your API key."),
        (
            403,
            "Permission denied. Your API key may not have the required permissions.",
        ),
        (404, "Resource not found. Check that the ID is correct."),
        (429, "Rate limit exceeded. Please wait a moment before retrying."),
        (503, "API error: 503 Service Unavailable"),
    ] {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let err = run(&server, "list_prompts", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_get_rendering_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"data": {"_id": "p1", "title": "One", "content": "body"}}),
        ))
        .mount(&server)
        .await;

    let first = run(&server, "get_prompt", json!({"promptId": "p1"}))
        .await
        .unwrap();
    let second = run(&server, "get_prompt", json!({"promptId": "p1"}))
        .await
        .unwrap();
    assert_eq!(first, second);
}
