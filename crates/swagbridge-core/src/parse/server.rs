use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::scalar_text;

/// The `servers` field: normally a list, tolerated as a single entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Servers {
    List(Vec<ServerEntry>),
    Single(ServerEntry),
}

impl Servers {
    /// The entry used to build the base URL.
    pub fn primary(&self) -> Option<&ServerEntry> {
        match self {
            Servers::List(entries) => entries.first(),
            Servers::Single(entry) => Some(entry),
        }
    }
}

/// One server declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerEntry {
    /// A bare URL string.
    Url(String),
    Object(Server),
    /// Anything else; yields no URL.
    Other(Value),
}

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Server {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub url: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub variables: IndexMap<String, VariableValue>,
}

/// A server variable: either a full definition or a bare value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Definition(ServerVariable),
    Literal(Value),
}

/// A server variable for URL templates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerVariable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        rename = "enum",
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub enum_values: Vec<Value>,
}

impl Default for VariableValue {
    fn default() -> Self {
        VariableValue::Literal(Value::Null)
    }
}

impl VariableValue {
    /// The substitution value: `default`, falling back to the first `enum`
    /// entry. Empty defaults fall through to the enum.
    pub fn value(&self) -> Option<String> {
        match self {
            VariableValue::Literal(value) => scalar_text(value),
            VariableValue::Definition(var) => var
                .default
                .as_ref()
                .and_then(scalar_text)
                .filter(|text| !text.is_empty())
                .or_else(|| var.enum_values.first().and_then(scalar_text)),
        }
    }
}
