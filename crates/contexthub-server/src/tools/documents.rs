//! Document tools.

use contexthub_api::ApiRequest;
use serde_json::{Value, json};

use crate::args::ToolArgs;
use crate::dispatch::{RequestPlan, Responses, ToolSpec};
use crate::error::Result;

use super::{array_field, field, pretty, query_string, str_field, summarize};

pub const LIST: ToolSpec = ToolSpec {
    name: "list_documents",
    description: "List documents, optionally filtered by collection.",
    schema: list_schema,
    build: build_list,
    render: render_list,
};

pub const GET: ToolSpec = ToolSpec {
    name: "get_document",
    description: "Get the full content of a specific document.",
    schema: get_schema,
    build: build_get,
    render: render_get,
};

pub const CREATE: ToolSpec = ToolSpec {
    name: "create_document",
    description: "Create a new text document.",
    schema: create_schema,
    build: build_create,
    render: render_create,
};

pub const UPDATE: ToolSpec = ToolSpec {
    name: "update_document",
    description: "Update an existing document. Only provide fields you want to change.",
    schema: update_schema,
    build: build_update,
    render: render_update,
};

pub const DELETE: ToolSpec = ToolSpec {
    name: "delete_document",
    description: "Permanently delete a document. This action cannot be undone.",
    schema: delete_schema,
    build: build_delete,
    render: render_delete,
};

// ─────────────────────────────────────────────────────────────────────────────
// Schemas
// ─────────────────────────────────────────────────────────────────────────────

fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "string", "description": "Filter to documents in a specific collection" },
            "search": { "type": "string", "description": "Search term to filter documents by title" },
            "limit": { "type": "number", "description": "Maximum number of results to return (default: 20, max: 100)" }
        }
    })
}

fn get_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "documentId": {
                "type": "string",
                "description": "The unique ID of the document to retrieve"
            }
        },
        "required": ["documentId"]
    })
}

fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "Title of the document" },
            "content": { "type": "string", "description": "The document content (plain text or markdown)" },
            "tags": { "type": "array", "items": { "type": "string" }, "description": "Tags for categorizing the document" }
        },
        "required": ["title", "content"]
    })
}

fn update_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "documentId": { "type": "string", "description": "The unique ID of the document to update" },
            "title": { "type": "string", "description": "New title (optional)" },
            "content": { "type": "string", "description": "New content (optional)" },
            "changeLog": { "type": "string", "description": "Description of what changed (for version history)" }
        },
        "required": ["documentId"]
    })
}

fn delete_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "documentId": {
                "type": "string",
                "description": "The unique ID of the document to delete"
            }
        },
        "required": ["documentId"]
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Request builders
// ─────────────────────────────────────────────────────────────────────────────

fn build_list(args: &ToolArgs) -> Result<RequestPlan> {
    let query = query_string(&[
        ("collectionId", args.query_value("collectionId")),
        ("search", args.query_value("search")),
        ("limit", args.query_value("limit")),
    ]);
    Ok(RequestPlan::single(ApiRequest::get(format!(
        "/v1/documents?{}",
        query
    ))))
}

fn build_get(args: &ToolArgs) -> Result<RequestPlan> {
    let document_id = args.require_str("documentId")?;
    Ok(RequestPlan::single(ApiRequest::get(format!(
        "/v1/documents/{}",
        document_id
    ))))
}

fn build_create(args: &ToolArgs) -> Result<RequestPlan> {
    // An untagged document still carries an empty tag list.
    let mut body = args.body_from(&["title", "content", "tags"]);
    body.entry("tags".to_string()).or_insert_with(|| json!([]));
    Ok(RequestPlan::single(ApiRequest::post(
        "/v1/documents",
        Value::Object(body),
    )))
}

fn build_update(args: &ToolArgs) -> Result<RequestPlan> {
    let document_id = args.require_str("documentId")?;
    Ok(RequestPlan::single(ApiRequest::patch(
        format!("/v1/documents/{}", document_id),
        Value::Object(args.without("documentId")),
    )))
}

fn build_delete(args: &ToolArgs) -> Result<RequestPlan> {
    let document_id = args.require_str("documentId")?;
    Ok(RequestPlan::single(ApiRequest::delete(format!(
        "/v1/documents/{}",
        document_id
    ))))
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderers
// ─────────────────────────────────────────────────────────────────────────────

fn render_list(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let records = array_field(&responses.primary, "data")?;
    pretty(&summarize(
        records,
        &[("id", "id"), ("title", "title"), ("status", "status")],
    ))
}

fn render_get(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    pretty(field(&responses.primary, "data")?)
}

fn render_create(args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Created document \"{}\"\n\nID: {}",
        args.require_str("title")?,
        str_field(data, "_id")?
    ))
}

fn render_update(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Updated document \"{}\"",
        str_field(data, "title")?
    ))
}

fn render_delete(args: &ToolArgs, _responses: &Responses) -> Result<String> {
    Ok(format!(
        "✓ Deleted document {}",
        args.require_str("documentId")?
    ))
}
