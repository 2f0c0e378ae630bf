//! The tool catalog.
//!
//! One family module per backend entity (prompts, collections, documents,
//! search); each exports its [`ToolSpec`] entries and [`TOOLS`] fixes their
//! order. Shared helpers for query strings and response fields live here.

pub mod collections;
pub mod documents;
pub mod prompts;
pub mod search;

use contexthub_mcp::ToolInfo;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::dispatch::ToolSpec;
use crate::error::{Result, ToolError};

/// Every tool the server exposes, in catalog order.
pub static TOOLS: &[ToolSpec] = &[
    prompts::LIST,
    prompts::GET,
    prompts::CREATE,
    prompts::UPDATE,
    prompts::DELETE,
    collections::LIST,
    collections::GET,
    collections::CREATE,
    collections::UPDATE,
    collections::DELETE,
    collections::ADD_ITEMS,
    collections::REMOVE_ITEMS,
    documents::LIST,
    documents::GET,
    documents::CREATE,
    documents::UPDATE,
    documents::DELETE,
    search::SEARCH,
];

/// Look up a tool by name.
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|spec| spec.name == name)
}

/// The catalog in the shape served by tools/list.
pub fn catalog() -> Vec<ToolInfo> {
    TOOLS
        .iter()
        .map(|spec| ToolInfo {
            name: spec.name.to_string(),
            description: Some(spec.description.to_string()),
            input_schema: Some((spec.schema)()),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared build/render helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Encode the present values as a query string, in the given order.
pub(crate) fn query_string(pairs: &[(&str, Option<String>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value {
            query.append_pair(key, value);
        }
    }
    query.finish()
}

/// A field the renderer cannot do without.
pub(crate) fn field<'a>(payload: &'a Value, key: &str) -> Result<&'a Value> {
    payload
        .get(key)
        .ok_or_else(|| ToolError::UnexpectedResponse(format!("missing `{}` field", key)))
}

/// A string field, e.g. an id or title echoed in a confirmation.
pub(crate) fn str_field<'a>(payload: &'a Value, key: &str) -> Result<&'a str> {
    field(payload, key)?
        .as_str()
        .ok_or_else(|| ToolError::UnexpectedResponse(format!("`{}` is not a string", key)))
}

/// An array field, e.g. the record list of a list endpoint.
pub(crate) fn array_field<'a>(payload: &'a Value, key: &str) -> Result<&'a [Value]> {
    field(payload, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ToolError::UnexpectedResponse(format!("`{}` is not an array", key)))
}

/// Reduce backend records to summaries carrying only the given fields, as
/// `(summary key, record key)` pairs in render order. Fields a record does
/// not have stay out of its summary.
pub(crate) fn summarize(records: &[Value], fields: &[(&str, &str)]) -> Value {
    let summaries = records
        .iter()
        .map(|record| {
            let mut summary = Map::new();
            for (key, source) in fields {
                if let Some(value) = record.get(*source) {
                    summary.insert((*key).to_string(), value.clone());
                }
            }
            Value::Object(summary)
        })
        .collect();
    Value::Array(summaries)
}

/// Pretty-print a payload for a text content block.
pub(crate) fn pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
