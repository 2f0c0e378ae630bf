//! Cross-entity search tool.
//!
//! Semantic mode is the backend default, so the `semantic` parameter only
//! appears on the wire when the caller explicitly turns it off.

use contexthub_api::ApiRequest;
use serde_json::{Value, json};

use crate::args::ToolArgs;
use crate::dispatch::{RequestPlan, Responses, ToolSpec};
use crate::error::{Result, ToolError};

use super::{field, query_string, str_field};

/// Descriptions in prompt hits are cut at this many characters.
const DESCRIPTION_PREVIEW_CHARS: usize = 100;

pub const SEARCH: ToolSpec = ToolSpec {
    name: "search_contexthub",
    description: "Search across all prompts, documents, and collections. Uses semantic search by default for natural language understanding.",
    schema: search_schema,
    build: build_search,
    render: render_search,
};

fn search_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "The search query"
            },
            "type": {
                "type": "string",
                "enum": ["prompts", "documents", "collections", "all"],
                "description": "Filter by type (default: all)"
            },
            "semantic": {
                "type": "boolean",
                "description": "Use semantic search for natural language understanding (default: true). Set to false for exact literal matching."
            }
        },
        "required": ["query"]
    })
}

fn build_search(args: &ToolArgs) -> Result<RequestPlan> {
    let query = args.require_str("query")?;

    let semantic = match args.bool("semantic") {
        Some(false) => Some("false".to_string()),
        _ => None,
    };
    let query = query_string(&[
        ("q", Some(query.to_string())),
        ("type", args.query_value("type")),
        ("semantic", semantic),
    ]);

    Ok(RequestPlan::single(ApiRequest::get(format!(
        "/v1/search?{}",
        query
    ))))
}

fn render_search(args: &ToolArgs, responses: &Responses) -> Result<String> {
    let query = args.require_str("query")?;
    let data = field(&responses.primary, "data")?;

    let mut sections = Vec::new();

    if let Some(prompts) = hits(data, "prompts") {
        let lines: Result<Vec<_>> = prompts.iter().map(prompt_line).collect();
        sections.push(format!(
            "### Prompts ({})\n{}",
            prompts.len(),
            lines?.join("\n")
        ));
    }

    if let Some(documents) = hits(data, "documents") {
        let lines: Result<Vec<_>> = documents.iter().map(document_line).collect();
        sections.push(format!(
            "### Documents ({})\n{}",
            documents.len(),
            lines?.join("\n")
        ));
    }

    if let Some(collections) = hits(data, "collections") {
        let lines: Result<Vec<_>> = collections.iter().map(collection_line).collect();
        sections.push(format!(
            "### Collections ({})\n{}",
            collections.len(),
            lines?.join("\n")
        ));
    }

    if sections.is_empty() {
        return Ok(format!("No results found for \"{}\".", query));
    }

    let semantic = responses
        .primary
        .get("meta")
        .and_then(|meta| meta.get("semantic"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let header = if semantic {
        format!("## Semantic Search Results for \"{}\"", query)
    } else {
        format!("## Search Results for \"{}\"", query)
    };

    Ok(format!("{}\n\n{}", header, sections.join("\n\n")))
}

/// A non-empty hit list under `key`; absent or empty lists yield no section.
fn hits<'a>(data: &'a Value, key: &str) -> Option<&'a [Value]> {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|hits| !hits.is_empty())
}

fn score(hit: &Value) -> Result<String> {
    field(hit, "score")?
        .as_f64()
        .map(|score| format!("{:.2}", score))
        .ok_or_else(|| ToolError::UnexpectedResponse("`score` is not a number".to_string()))
}

fn prompt_line(hit: &Value) -> Result<String> {
    let description = hit.get("description").and_then(Value::as_str).unwrap_or("");
    let preview: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    let ellipsis = if description.chars().count() > DESCRIPTION_PREVIEW_CHARS {
        "..."
    } else {
        ""
    };
    Ok(format!(
        "- **{}** (score: {}) - {}{}",
        str_field(hit, "title")?,
        score(hit)?,
        preview,
        ellipsis
    ))
}

fn document_line(hit: &Value) -> Result<String> {
    Ok(format!(
        "- **{}** (score: {})",
        str_field(hit, "title")?,
        score(hit)?
    ))
}

fn collection_line(hit: &Value) -> Result<String> {
    Ok(format!(
        "- **{}** (score: {}, {} matched items)",
        str_field(hit, "name")?,
        score(hit)?,
        field(hit, "matchedItems")?
    ))
}
