use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A media type object (OpenAPI 3.x `content` entry).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Pick the preferred entry of a `content` map: `application/json` when
/// declared, the first entry otherwise.
pub fn preferred_media_type(content: &IndexMap<String, MediaType>) -> Option<(&str, &MediaType)> {
    content
        .get_key_value("application/json")
        .or_else(|| content.first())
        .map(|(content_type, media)| (content_type.as_str(), media))
}
