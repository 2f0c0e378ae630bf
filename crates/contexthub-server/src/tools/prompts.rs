//! Prompt tools.

use contexthub_api::ApiRequest;
use serde_json::{Value, json};

use crate::args::ToolArgs;
use crate::dispatch::{RequestPlan, Responses, ToolSpec};
use crate::error::Result;

use super::{array_field, field, pretty, query_string, str_field, summarize};

pub const LIST: ToolSpec = ToolSpec {
    name: "list_prompts",
    description: "List all prompts with optional search. Returns prompt titles, descriptions, and IDs.",
    schema: list_schema,
    build: build_list,
    render: render_list,
};

pub const GET: ToolSpec = ToolSpec {
    name: "get_prompt",
    description: "Get the full details of a specific prompt including its content, parameters, and variables.",
    schema: get_schema,
    build: build_get,
    render: render_get,
};

pub const CREATE: ToolSpec = ToolSpec {
    name: "create_prompt",
    description: "Create a new prompt template. Prompts can include variables using ${variableName} syntax.",
    schema: create_schema,
    build: build_create,
    render: render_create,
};

pub const UPDATE: ToolSpec = ToolSpec {
    name: "update_prompt",
    description: "Update an existing prompt. Only provide the fields you want to change.",
    schema: update_schema,
    build: build_update,
    render: render_update,
};

pub const DELETE: ToolSpec = ToolSpec {
    name: "delete_prompt",
    description: "Permanently delete a prompt. This action cannot be undone.",
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
            "search": {
                "type": "string",
                "description": "Search term to filter prompts by title or description"
            },
            "limit": {
                "type": "number",
                "description": "Maximum number of results to return (default: 20, max: 100)"
            }
        }
    })
}

fn get_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "promptId": {
                "type": "string",
                "description": "The unique ID of the prompt to retrieve"
            }
        },
        "required": ["promptId"]
    })
}

fn create_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "description": "Title of the prompt" },
            "description": { "type": "string", "description": "Brief description of what the prompt does" },
            "content": { "type": "string", "description": "The prompt template content. Use ${variableName} for variables." },
            "engine": { "type": "string", "description": "Target AI model (e.g., 'gpt-4', 'claude-3', 'gemini-pro')" }
        },
        "required": ["title", "description", "content", "engine"]
    })
}

fn update_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "promptId": { "type": "string", "description": "The unique ID of the prompt to update" },
            "title": { "type": "string", "description": "New title (optional)" },
            "description": { "type": "string", "description": "New description (optional)" },
            "content": { "type": "string", "description": "New content (optional)" },
            "changeLog": { "type": "string", "description": "Description of what changed (for version history)" }
        },
        "required": ["promptId"]
    })
}

fn delete_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "promptId": {
                "type": "string",
                "description": "The unique ID of the prompt to delete"
            }
        },
        "required": ["promptId"]
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Request builders
// ─────────────────────────────────────────────────────────────────────────────

fn build_list(args: &ToolArgs) -> Result<RequestPlan> {
    let query = query_string(&[
        ("q", args.query_value("search")),
        ("limit", args.query_value("limit")),
    ]);
    Ok(RequestPlan::single(ApiRequest::get(format!(
        "/v1/prompts?{}",
        query
    ))))
}

fn build_get(args: &ToolArgs) -> Result<RequestPlan> {
    let prompt_id = args.require_str("promptId")?;
    Ok(RequestPlan::single(ApiRequest::get(format!(
        "/v1/prompts/{}",
        prompt_id
    ))))
}

fn build_create(args: &ToolArgs) -> Result<RequestPlan> {
    // New prompts always start with empty parameter/variable containers.
    let mut body = args.body_from(&["title", "description", "content", "engine"]);
    body.insert("parameters".to_string(), json!({}));
    body.insert("variables".to_string(), json!([]));
    Ok(RequestPlan::single(ApiRequest::post(
        "/v1/prompts",
        Value::Object(body),
    )))
}

fn build_update(args: &ToolArgs) -> Result<RequestPlan> {
    let prompt_id = args.require_str("promptId")?;
    Ok(RequestPlan::single(ApiRequest::patch(
        format!("/v1/prompts/{}", prompt_id),
        Value::Object(args.without("promptId")),
    )))
}

fn build_delete(args: &ToolArgs) -> Result<RequestPlan> {
    let prompt_id = args.require_str("promptId")?;
    Ok(RequestPlan::single(ApiRequest::delete(format!(
        "/v1/prompts/{}",
        prompt_id
    ))))
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderers
// ─────────────────────────────────────────────────────────────────────────────

fn render_list(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let records = array_field(&responses.primary, "data")?;
    pretty(&summarize(
        records,
        &[
            ("id", "_id"),
            ("title", "title"),
            ("description", "description"),
            ("engine", "engine"),
        ],
    ))
}

fn render_get(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    pretty(field(&responses.primary, "data")?)
}

fn render_create(args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Created prompt \"{}\"\n\nID: {}",
        args.require_str("title")?,
        str_field(data, "_id")?
    ))
}

fn render_update(_args: &ToolArgs, responses: &Responses) -> Result<String> {
    let data = field(&responses.primary, "data")?;
    Ok(format!(
        "✓ Updated prompt \"{}\"\n\nNew version: {}",
        str_field(data, "title")?,
        field(data, "currentVersion")?
    ))
}

fn render_delete(args: &ToolArgs, _responses: &Responses) -> Result<String> {
    Ok(format!("✓ Deleted prompt {}", args.require_str("promptId")?))
}
