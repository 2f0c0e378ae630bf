//! Tool argument accessors.

use serde_json::{Map, Value};

use crate::error::{Result, ToolError};

/// The argument record of one invocation.
///
/// Arguments arrive as arbitrary JSON; accessors here are the only place
/// dispatch code touches them. No schema validation happens — the transport
/// owns argument well-formedness, and the backend owns business rules. The
/// only hard failures are [`require_str`](Self::require_str) misses on
/// arguments a request cannot be built without.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    /// Wrap the `arguments` value of a tools/call request. Anything other
    /// than a JSON object (absent, null) behaves as an empty record.
    pub fn new(arguments: Option<Value>) -> Self {
        match arguments {
            Some(Value::Object(map)) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Raw argument value, if present and non-null.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// String argument, if present.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String argument that the request cannot be built without.
    pub fn require_str(&self, key: &'static str) -> Result<&str> {
        self.str(key).ok_or(ToolError::MissingArgument(key))
    }

    /// Boolean argument, if present.
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Argument rendered as a query-parameter value: strings pass through,
    /// numbers and booleans are stringified, anything else is not a scalar.
    /// Empty strings, zero, and false all count as absent, so they never
    /// become query parameters.
    pub fn query_value(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }

    /// Build a body from the listed keys, copying only those present.
    pub fn body_from(&self, keys: &[&str]) -> Map<String, Value> {
        let mut body = Map::new();
        for key in keys {
            if let Some(value) = self.get(key) {
                body.insert((*key).to_string(), value.clone());
            }
        }
        body
    }

    /// All arguments except `key` — the partial-update body shape.
    pub fn without(&self, key: &str) -> Map<String, Value> {
        let mut body = self.0.clone();
        body.remove(key);
        body
    }
}
