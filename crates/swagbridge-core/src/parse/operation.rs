use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::parameter::Parameter;
use super::request_body::RequestBody;
use super::response::Response;

/// HTTP method of an operation, as spelled in a path item key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// Whether the method implies a state-changing call.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete
        )
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a path item key is not a (lowercase) HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAMethod;

impl FromStr for HttpMethod {
    type Err = NotAMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(HttpMethod::Get),
            "put" => Ok(HttpMethod::Put),
            "post" => Ok(HttpMethod::Post),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "patch" => Ok(HttpMethod::Patch),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(NotAMethod),
        }
    }
}

/// An API operation.
///
/// Fields of the wrong type read as absent, so a malformed operation still
/// yields an endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(
        rename = "operationId",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parameters: Vec<Parameter>,

    #[serde(
        rename = "requestBody",
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RequestBody>,

    /// Responses by status code. Entries that are not response objects
    /// (`x-*` extensions, scalars) are kept with no body.
    #[serde(
        default,
        deserialize_with = "lenient::present_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub responses: Option<IndexMap<String, Response>>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A path item: operations keyed by HTTP method, in document order.
///
/// Keys that are not lowercase HTTP methods (`parameters`, `summary`,
/// `servers`, `x-*` extensions, `GET`, ...) are kept in `extra` and never
/// become operations. A path item that is not a mapping has no operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "IndexMap<String, Value>")]
pub struct PathItem {
    pub operations: IndexMap<HttpMethod, Operation>,
    pub extra: IndexMap<String, Value>,
}

impl From<Value> for PathItem {
    fn from(value: Value) -> Self {
        let mut item = PathItem::default();
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                log::debug!("path item `{other}` is not a mapping");
                return item;
            }
        };

        for (key, value) in entries {
            match key.parse::<HttpMethod>() {
                Ok(method) => {
                    let operation = serde_json::from_value(value).unwrap_or_else(|e| {
                        log::debug!("operation `{key}` read as empty: {e}");
                        Operation::default()
                    });
                    item.operations.insert(method, operation);
                }
                Err(NotAMethod) => {
                    log::debug!("path item key `{key}` is not an operation");
                    item.extra.insert(key, value);
                }
            }
        }
        item
    }
}

impl From<PathItem> for IndexMap<String, Value> {
    fn from(item: PathItem) -> Self {
        let mut entries = item.extra;
        for (method, operation) in item.operations {
            let value = serde_json::to_value(operation).unwrap_or(Value::Null);
            entries.insert(method.as_str().to_string(), value);
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_parsing_is_case_sensitive() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("GET".parse::<HttpMethod>(), Err(NotAMethod));
        assert_eq!("parameters".parse::<HttpMethod>(), Err(NotAMethod));
    }

    #[test]
    fn test_mutation_methods() {
        for method in [
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            assert!(method.is_mutation(), "{method} should be a mutation");
        }
        for method in [
            HttpMethod::Get,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Trace,
        ] {
            assert!(!method.is_mutation(), "{method} should not be a mutation");
        }
    }

    #[test]
    fn test_path_item_splits_operations_from_other_keys() {
        let item: PathItem = serde_json::from_value(json!({
            "summary": "Pets",
            "post": { "operationId": "addPet" },
            "parameters": [{ "name": "x", "in": "query" }],
            "get": { "operationId": "listPets" },
        }))
        .unwrap();

        let methods: Vec<_> = item.operations.keys().copied().collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
        assert!(item.extra.contains_key("summary"));
        assert!(item.extra.contains_key("parameters"));
    }

    #[test]
    fn test_operation_keeps_unknown_keys() {
        let op: Operation = serde_json::from_value(json!({
            "operationId": "listPets",
            "tags": ["pets"],
            "x-internal": true,
        }))
        .unwrap();
        assert_eq!(op.operation_id.as_deref(), Some("listPets"));
        assert_eq!(op.extra.get("tags"), Some(&json!(["pets"])));
        assert!(op.responses.is_none());
    }

    #[test]
    fn test_operation_fields_of_wrong_type_read_as_absent() {
        let op: Operation = serde_json::from_value(json!({
            "operationId": ["not", "a", "name"],
            "description": 5,
            "parameters": "none",
            "requestBody": true,
            "responses": {
                "x-rate-limit": 100,
                "200": { "description": 7, "schema": { "type": "string" } }
            }
        }))
        .unwrap();
        assert_eq!(op.operation_id, None);
        assert_eq!(op.description, None);
        assert!(op.parameters.is_empty());
        assert!(op.request_body.is_none());

        let responses = op.responses.unwrap();
        assert_eq!(responses["x-rate-limit"], Response::default());
        assert_eq!(
            responses["200"].body_schema(),
            Some(json!({ "type": "string" }))
        );
    }

    #[test]
    fn test_path_item_tolerates_malformed_values() {
        let item: PathItem = serde_json::from_value(json!(42)).unwrap();
        assert!(item.operations.is_empty());

        let item: PathItem = serde_json::from_value(json!({
            "get": null,
            "GET": { "operationId": "shouting" },
            "x-owner": "pets-team"
        }))
        .unwrap();
        let methods: Vec<_> = item.operations.keys().copied().collect();
        assert_eq!(methods, vec![HttpMethod::Get]);
        assert_eq!(item.operations[&HttpMethod::Get], Operation::default());
        assert!(item.extra.contains_key("GET"));
    }
}
