use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::derive::name_normalizer::sanitize_parameter_name;
use crate::parse::media_type::preferred_media_type;
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::{Parameter, ParameterLocation};
use crate::parse::scalar_text;

/// Call arguments, keyed by parameter name.
pub type RequestArgs = Map<String, Value>;

/// What an endpoint hands to a [`RequestBuilder`].
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions<'a> {
    pub request: &'a RequestArgs,
    /// Base URL followed by the raw path template.
    pub url: &'a str,
    pub method: HttpMethod,
}

/// Turns an operation plus call arguments into a request description.
/// Endpoints return the output unchanged.
pub trait RequestBuilder {
    type Output;

    fn build(&self, operation: &Operation, options: RequestOptions<'_>) -> Self::Output;
}

/// A transport-agnostic HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestPayload {
    Json(Value),
    /// `application/x-www-form-urlencoded` text.
    Form(String),
}

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Characters escaped when a value is substituted into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Fills path, query, header, cookie and body parameters from the call
/// arguments. Missing arguments are skipped; nothing is validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRequestBuilder;

impl RequestBuilder for DefaultRequestBuilder {
    type Output = RequestDescriptor;

    fn build(&self, operation: &Operation, options: RequestOptions<'_>) -> RequestDescriptor {
        let mut url = options.url.to_string();
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        let mut form = form_urlencoded::Serializer::new(String::new());
        let mut has_form = false;
        let mut headers = IndexMap::new();
        let mut cookies = Vec::new();
        let mut body = None;

        for param in &operation.parameters {
            let Some(value) = argument(options.request, param) else {
                continue;
            };
            match param.location() {
                Some(ParameterLocation::Path) => {
                    let text = scalar_text(value).unwrap_or_else(|| value.to_string());
                    let encoded = utf8_percent_encode(&text, PATH_SEGMENT).to_string();
                    url = url.replace(&format!("{{{}}}", param.name), &encoded);
                }
                Some(ParameterLocation::Query) => {
                    for text in values_of(value) {
                        query.append_pair(&param.name, &text);
                        has_query = true;
                    }
                }
                Some(ParameterLocation::FormData) => {
                    for text in values_of(value) {
                        form.append_pair(&param.name, &text);
                        has_form = true;
                    }
                }
                Some(ParameterLocation::Header) => {
                    headers.insert(param.name.clone(), values_of(value).join(","));
                }
                Some(ParameterLocation::Cookie) => {
                    cookies.push(format!("{}={}", param.name, values_of(value).join(",")));
                }
                Some(ParameterLocation::Body) => {
                    body = Some(RequestPayload::Json(value.clone()));
                }
                None => log::debug!(
                    "parameter `{}` has unknown location {:?}",
                    param.name,
                    param.location
                ),
            }
        }

        if has_query {
            let separator = if url.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str(&query.finish());
        }
        if !cookies.is_empty() {
            headers.insert("Cookie".to_string(), cookies.join("; "));
        }

        if has_form {
            body = Some(RequestPayload::Form(form.finish()));
            headers
                .entry("Content-Type".to_string())
                .or_insert_with(|| FORM.to_string());
        } else if let Some(request_body) = &operation.request_body {
            if let Some(value) = options.request.get("body").filter(|v| !v.is_null()) {
                let content_type = preferred_media_type(&request_body.content)
                    .map(|(content_type, _)| content_type)
                    .unwrap_or(JSON);
                body = Some(match value {
                    Value::Object(fields) if content_type == FORM => {
                        RequestPayload::Form(encode_form(fields))
                    }
                    _ => RequestPayload::Json(value.clone()),
                });
                headers
                    .entry("Content-Type".to_string())
                    .or_insert_with(|| content_type.to_string());
            }
        } else if matches!(body, Some(RequestPayload::Json(_))) {
            headers
                .entry("Content-Type".to_string())
                .or_insert_with(|| JSON.to_string());
        }

        RequestDescriptor {
            method: options.method.as_str().to_ascii_uppercase(),
            url,
            headers,
            body,
        }
    }
}

/// Look an argument up by its declared name, then by its sanitized name.
fn argument<'a>(args: &'a RequestArgs, param: &Parameter) -> Option<&'a Value> {
    args.get(&param.name)
        .or_else(|| args.get(&sanitize_parameter_name(&param.name)))
        .filter(|value| !value.is_null())
}

/// Arrays expand to one value per item.
fn values_of(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| scalar_text(item).unwrap_or_else(|| item.to_string()))
            .collect(),
        other => vec![scalar_text(other).unwrap_or_else(|| other.to_string())],
    }
}

fn encode_form(fields: &Map<String, Value>) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        for text in values_of(value) {
            form.append_pair(name, &text);
        }
    }
    form.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn operation(value: Value) -> Operation {
        serde_json::from_value(value).unwrap()
    }

    fn args(value: Value) -> RequestArgs {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn build(op: &Operation, args: &RequestArgs, method: HttpMethod) -> RequestDescriptor {
        DefaultRequestBuilder.build(
            op,
            RequestOptions {
                request: args,
                url: "https://api.example.com/pets/{pet-id}",
                method,
            },
        )
    }

    #[test]
    fn test_path_query_and_header_parameters() {
        let op = operation(json!({
            "parameters": [
                { "name": "pet-id", "in": "path", "type": "string" },
                { "name": "tags", "in": "query", "type": "array" },
                { "name": "limit", "in": "query", "type": "integer" },
                { "name": "X-Request-Id", "in": "header", "type": "string" }
            ]
        }));
        let request = build(
            &op,
            &args(json!({
                "pet_id": "a b/c",
                "tags": ["x", "y z"],
                "limit": 10,
                "X_Request_Id": "abc"
            })),
            HttpMethod::Get,
        );

        assert_eq!(request.method, "GET");
        assert_eq!(
            request.url,
            "https://api.example.com/pets/a%20b%2Fc?tags=x&tags=y+z&limit=10"
        );
        assert_eq!(request.headers.get("X-Request-Id").map(String::as_str), Some("abc"));
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_missing_arguments_are_skipped() {
        let op = operation(json!({
            "parameters": [{ "name": "limit", "in": "query" }]
        }));
        let request = build(&op, &args(json!({ "limit": null })), HttpMethod::Get);
        assert_eq!(request.url, "https://api.example.com/pets/{pet-id}");
    }

    #[test]
    fn test_swagger2_body_parameter() {
        let op = operation(json!({
            "parameters": [{ "name": "pet", "in": "body", "schema": { "type": "object" } }]
        }));
        let request = build(&op, &args(json!({ "pet": { "name": "Rex" } })), HttpMethod::Post);
        assert_eq!(request.method, "POST");
        assert_eq!(request.body, Some(RequestPayload::Json(json!({ "name": "Rex" }))));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_swagger2_form_data() {
        let op = operation(json!({
            "parameters": [
                { "name": "name", "in": "formData", "type": "string" },
                { "name": "status", "in": "formData", "type": "string" }
            ]
        }));
        let request = build(
            &op,
            &args(json!({ "name": "Rex", "status": "sold out" })),
            HttpMethod::Post,
        );
        assert_eq!(
            request.body,
            Some(RequestPayload::Form("name=Rex&status=sold+out".to_string()))
        );
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some(FORM)
        );
    }

    #[test]
    fn test_openapi3_request_body() {
        let op = operation(json!({
            "requestBody": {
                "content": { "application/json": { "schema": { "type": "object" } } }
            }
        }));
        let request = build(&op, &args(json!({ "body": { "name": "Rex" } })), HttpMethod::Put);
        assert_eq!(request.method, "PUT");
        assert_eq!(request.body, Some(RequestPayload::Json(json!({ "name": "Rex" }))));
    }

    #[test]
    fn test_cookie_parameters() {
        let op = operation(json!({
            "parameters": [
                { "name": "session", "in": "cookie" },
                { "name": "theme", "in": "cookie" }
            ]
        }));
        let request = build(
            &op,
            &args(json!({ "session": "s1", "theme": "dark" })),
            HttpMethod::Get,
        );
        assert_eq!(
            request.headers.get("Cookie").map(String::as_str),
            Some("session=s1; theme=dark")
        );
    }
}
