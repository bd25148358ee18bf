pub mod lenient;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod request_body;
pub mod response;
pub mod server;
pub mod spec;

use serde_json::Value;

use crate::error::ParseError;
use spec::SchemaDocument;

/// Parse a schema document from YAML.
pub fn from_yaml(input: &str) -> Result<SchemaDocument, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(value)
}

/// Parse a schema document from JSON.
pub fn from_json(input: &str) -> Result<SchemaDocument, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Build a schema document from an already parsed (and usually already
/// dereferenced) JSON value.
pub fn from_value(value: Value) -> Result<SchemaDocument, ParseError> {
    match value {
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        Value::Null => Ok(SchemaDocument::default()),
        other => Err(ParseError::NotAMapping(kind_of(&other))),
    }
}

/// Render a scalar JSON value as plain text. Strings are used as-is.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
