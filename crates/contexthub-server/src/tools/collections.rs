//! Collection tools, including item membership.
//!
//! `add_to_collection` and `remove_from_collection` hit the same
//! `/items` path with POST and PUT respectively; the backend defines the
//! methods that way round.

use contexthub_api::ApiRequest;
use serde_json::{Value, json};

use crate::args::ToolArgs;
use crate::dispatch::{RequestPlan, Responses, ToolSpec};
use crate::error::{Result, ToolError};

use super::{array_field, field, pretty, query_string, str_field, summarize};

pub const LIST: ToolSpec = ToolSpec {
    name: "list_collections",
    description: "List all collections you have access to. Collections organize prompts and documents.",
    schema: list_schema,
    build: build_list,
    render: render_list,
};

pub const GET: ToolSpec = ToolSpec {
    name: "get_collection",
    description: "Get details of a specific collection including its items.",
    schema: get_schema,
    build: build_get,
    render: render_get,
};

pub const CREATE: ToolSpec = ToolSpec {
    name: "create_collection",
    description: "Create a new collection to organize prompts and documents.",
    schema: create_schema,
    build: build_create,
    render: render_create,
};

pub const UPDATE: ToolSpec = ToolSpec {
    name: "update_collection",
    description: "Update a collection's metadata.",
    schema: update_schema,
    build: build_update,
    render: render_update,
};

pub const DELETE: ToolSpec = ToolSpec {
    name: "delete_collection",
    description: "Delete a collection. Items in the collection are not deleted.",
    schema: delete_schema,
    build: build_delete,
    render: render_delete,
};

pub const ADD_ITEMS: ToolSpec = ToolSpec {
    name: "add_to_collection",
    description: "Add documents or prompts to a collection.",
    schema: add_items_schema,
    build: build_add_items,
    render: render_add_items,
};

pub const REMOVE_ITEMS: ToolSpec = ToolSpec {
    name: "remove_from_collection",
    description: "Remove documents or prompts from a collection.",
    schema: remove_items_schema,
    build: build_remove_items,
    render: render_remove_items,
};

// ─────────────────────────────────────────────────────────────────────────────
// Schemas
// ─────────────────────────────────────────────────────────────────────────────

fn list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "search": { "type": "string", "description": "Search term to filter collections by name or description" },
            "limit": { "type": "number", "description": "Maximum number of results to return (default: 20, max: 100)" }
        }
    })
}

fn get_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "string", "description": "The unique ID of the collection" },
            "includeItems": { "type": "boolean", "description": "Include list of items in the collection (default: false)" }
        },
        "required": ["collectionId"]
    })
}

fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Name of the collection" },
            "description": { "type": "string", "description": "Description of what the collection contains" },
            "color": { "type": "string", "description": "Color code for the collection (e.g., #f97316)" },
            "icon": { "type": "string", "description": "Emoji icon for the collection" }
        },
        "required": ["name"]
    })
}

fn update_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "string", "description": "The unique ID of the collection to update" },
            "name": { "type": "string", "description": "New name for the collection" },
            "description": { "type": "string", "description": "New description" },
            "color": { "type": "string", "description": "New color code" },
            "icon": { "type": "string", "description": "New emoji icon" }
        },
        "required": ["collectionId"]
    })
}

fn delete_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "string", "description": "The unique ID of the collection to delete" }
        },
        "required": ["collectionId"]
    })
}

fn add_items_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "string", "description": "The collection to add items to" },
            "itemIds": { "type": "array", "items": { "type": "string" }, "description": "Array of document or prompt IDs to add" },
            "itemType": { "type": "string", "enum": ["document", "prompt"], "description": "Type of items being added" }
        },
        "required": ["collectionId", "itemIds", "itemType"]
    })
}

fn remove_items_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "collectionId": { "type": "string", "description": "The collection to remove items from" },
            "itemIds": { "type": "array", "items": { "type": "string" }, "description": "Array of document or prompt IDs to remove" },
            "itemType": { "type": "string", "enum": ["document", "prompt"], "description": "Type of items being removed" }
        },
        "required": ["collectionId", "itemIds", "itemType"]
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Request builders
// ─────────────────────────────────────────────────────────────────────────────

fn build_list(args: &ToolArgs) -> Result<RequestPlan> {
    let query = query_string(&[
        ("search", args.query_value("search")),
        ("limit", args.query_value("limit")),
    ]);
    Ok(RequestPlan::single(ApiRequest::get(format!(
        "/v1/collections?{}",
        query
    ))))
}

/// The `includeItems` flag decides the follow-up request up front; whether
/// the collection exists is the backend's call, not ours.
fn build_get(args: &ToolArgs) -> Result<RequestPlan> {
    let collection_id = args.require_str("collectionId")?;
    let primary = ApiRequest::get(format!("/v1/collections/{}", collection_id));

    if args.bool("includeItems").unwrap_or(false) {
        let items = ApiRequest::get(format!("/v1/collections/{}/items?limit=50", collection_id));
        Ok(RequestPlan::with_follow_up(primary, items))
    } else {
        Ok(RequestPlan::single(primary))
    }
}

fn build_create(args: &ToolArgs) -> Result<RequestPlan> {
    let body = args.body_from(&["name", "description", "color", "icon"]);
    Ok(RequestPlan::single(ApiRequest::post(
        "/v1/collections",
        Value::Object(body),
    )))
}

fn build_update(args: &ToolArgs) -> Result<RequestPlan> {
    let collection_id = args.require_str("collectionId")?;
    Ok(RequestPlan::single(ApiRequest::patch(
        format!("/v1/collections/{}", collection_id),
        Value::Object(args.without("collectionId")),
    )))
}

fn build_delete(args: &ToolArgs) -> Result<RequestPlan> {
    let collection_id = args.require_str("collectionId")?;
    Ok(RequestPlan::single(ApiRequest::delete(format!(
        "/v1/collections/{}",
        collection_id
    ))))
}

fn build_add_items(args: &ToolArgs) -> Result<RequestPlan> {
    let collection_id = args.require_str("collectionId")?;
    let body = args.body_from(&["itemIds", "itemType"]);
    Ok(RequestPlan::single(ApiRequest::post(
        format!("/v1/collections/{}/items", collection_id),
        Value::Object(body),
    )))
}

fn build_remove_items(args: &ToolArgs) -> Result<RequestPlan> {
    let collection_id = args.require_str("collectionId")?;
    let body = args.body_from(&["itemIds", "itemType"]);
    Ok(RequestPlan::single(ApiRequest::put(
        format!("/v1/collections/{}/items", collection_id),
        Value::Object(body),
    )))
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderers
// ─────────────────────────────────────────────────────────────────────────────

fn render_list(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let records = array_field(&responses.primary, "data")?;
    pretty(&summarize(
        records,
        &[
            ("id", "id"),
            ("name", "name"),
            ("description", "description"),
            ("itemCount", "itemCount"),
        ],
    ))
}

fn render_get(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;

    let Some(items) = &responses.follow_up else {
        return pretty(data);
    };

    let mut merged = data
        .as_object()
        .cloned()
        .ok_or_else(|| ToolError::UnexpectedResponse("`data` is not an object".to_string()))?;
    merged.insert("items".to_string(), field(items, "data")?.clone());
    pretty(&Value::Object(merged))
}

fn render_create(args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Created collection \"{}\"\n\nID: {}",
        args.require_str("name")?,
        str_field(data, "_id")?
    ))
}

fn render_update(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Updated collection \"{}\"",
        str_field(data, "name")?
    ))
}

fn render_delete(args: &ToolArgs, _responses: &Responses) -> Result<String> {
    Ok(format!(
        "✓ Deleted collection {}",
        args.require_str("collectionId")?
    ))
}

fn render_add_items(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Added {} item(s) to collection\n\nAlready in collection: {}",
        field(data, "added")?,
        field(data, "alreadyInCollection")?
    ))
}

fn render_remove_items(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Removed {} item(s) from collection",
        field(data, "removed")?
    ))
}
