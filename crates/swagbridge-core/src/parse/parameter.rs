use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Parameter location (`in`), covering both OpenAPI 3.x and Swagger 2.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
    /// Swagger 2.0 request body parameter.
    Body,
    /// Swagger 2.0 form field.
    FormData,
}

impl ParameterLocation {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "path" => Some(ParameterLocation::Path),
            "cookie" => Some(ParameterLocation::Cookie),
            "body" => Some(ParameterLocation::Body),
            "formData" => Some(ParameterLocation::FormData),
            _ => None,
        }
    }
}

#[derive(Default, Deserialize)]
struct ParameterFields {
    #[serde(default, deserialize_with = "lenient::or_default")]
    name: String,

    #[serde(rename = "in", default, deserialize_with = "lenient::option")]
    location: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient::option")]
    param_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    required: bool,

    #[serde(default)]
    schema: Option<Value>,
}

/// An API parameter.
///
/// The typed fields are read from the fragment; `raw` is the fragment itself
/// and is what the parameter serializes back to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Parameter {
    pub name: String,
    pub location: Option<String>,
    pub param_type: Option<String>,
    pub required: bool,
    pub schema: Option<Value>,
    pub raw: Value,
}

impl Parameter {
    pub fn location(&self) -> Option<ParameterLocation> {
        self.location.as_deref().and_then(ParameterLocation::from_keyword)
    }

    /// The primitive type tag: Swagger 2.0 `type`, or `schema.type` for
    /// OpenAPI 3.x parameters.
    pub fn primitive_type(&self) -> Option<String> {
        self.param_type.clone().or_else(|| {
            self.schema
                .as_ref()
                .and_then(|s| s.get("type"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
    }
}

impl From<Value> for Parameter {
    fn from(raw: Value) -> Self {
        let fields = ParameterFields::deserialize(&raw).unwrap_or_else(|e| {
            log::debug!("parameter `{raw}` is not a mapping: {e}");
            ParameterFields::default()
        });
        Parameter {
            name: fields.name,
            location: fields.location,
            param_type: fields.param_type,
            required: fields.required,
            schema: fields.schema,
            raw,
        }
    }
}

impl From<Parameter> for Value {
    fn from(param: Parameter) -> Self {
        param.raw
    }
}
