use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::media_type::{MediaType, preferred_media_type};

/// A response definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(
        default,
        deserialize_with = "lenient::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Swagger 2.0 response schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// OpenAPI 3.x response content.
    #[serde(
        default,
        deserialize_with = "lenient::map",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub content: IndexMap<String, MediaType>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Response {
    /// The JSON schema of the response body, if any.
    pub fn body_schema(&self) -> Option<Value> {
        self.schema.clone().or_else(|| {
            preferred_media_type(&self.content).and_then(|(_, media)| media.schema.clone())
        })
    }
}
