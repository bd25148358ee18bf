use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;
use super::media_type::MediaType;

/// An OpenAPI 3.x request body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestBody {
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
    pub content: IndexMap<String, MediaType>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub required: bool,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}
