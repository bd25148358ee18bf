use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::EndpointError;
use crate::parse::operation::{HttpMethod, Operation};
use crate::request::{RequestArgs, RequestBuilder, RequestOptions};

/// Derived endpoints keyed by type name, in document order.
pub type EndpointMap = IndexMap<String, EndpointDescriptor>;

/// A parameter of a derived endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointParameter {
    /// The declared name with every character outside `[a-zA-Z0-9_]`
    /// replaced by `_`.
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// The full parameter fragment as declared.
    #[serde(rename = "jsonSchema")]
    pub json_schema: Value,
}

/// The invocable representation of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointDescriptor {
    pub parameters: Vec<EndpointParameter>,
    pub description: Option<String>,
    /// Schema of the selected success response; `None` serializes as `null`.
    pub response: Option<Value>,
    pub mutation: bool,
    #[serde(skip)]
    pub request: EndpointRequest,
}

impl EndpointDescriptor {
    /// Build the request for this endpoint. See [`EndpointRequest::build_request`].
    pub fn build_request<B>(
        &self,
        builder: &B,
        args: &RequestArgs,
        base_url: Option<&str>,
    ) -> Result<B::Output, EndpointError>
    where
        B: RequestBuilder + ?Sized,
    {
        self.request.build_request(builder, args, base_url)
    }
}

/// Everything needed to turn call arguments into a request for one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRequest {
    pub operation: Arc<Operation>,
    /// The raw path template, e.g. `/pets/{petId}`.
    pub path: String,
    pub method: HttpMethod,
    /// Server URL resolved when the endpoints were derived.
    pub base_url: Option<String>,
}

impl EndpointRequest {
    /// Base URL followed by the raw path template. An explicit, non-empty
    /// `base_url` takes precedence over the one captured at derivation.
    pub fn url(&self, base_url: Option<&str>) -> Result<String, EndpointError> {
        let base = base_url
            .filter(|url| !url.is_empty())
            .or(self.base_url.as_deref())
            .filter(|url| !url.is_empty())
            .ok_or(EndpointError::MissingBaseUrl)?;
        Ok(format!("{base}{}", self.path))
    }

    /// Hand the operation, the arguments, the full URL and the method to
    /// `builder` and return whatever it produces.
    pub fn build_request<B>(
        &self,
        builder: &B,
        args: &RequestArgs,
        base_url: Option<&str>,
    ) -> Result<B::Output, EndpointError>
    where
        B: RequestBuilder + ?Sized,
    {
        let url = self.url(base_url)?;
        Ok(builder.build(
            &self.operation,
            RequestOptions {
                request: args,
                url: &url,
                method: self.method,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl RequestBuilder for Echo {
        type Output = (String, HttpMethod, usize);

        fn build(&self, _operation: &Operation, options: RequestOptions<'_>) -> Self::Output {
            (options.url.to_string(), options.method, options.request.len())
        }
    }

    fn request(base_url: Option<&str>) -> EndpointRequest {
        EndpointRequest {
            operation: Arc::new(Operation::default()),
            path: "/pets/{petId}".to_string(),
            method: HttpMethod::Get,
            base_url: base_url.map(str::to_owned),
        }
    }

    #[test]
    fn test_captured_base_url() {
        let out = request(Some("https://api.example.com"))
            .build_request(&Echo, &RequestArgs::new(), None)
            .unwrap();
        assert_eq!(out.0, "https://api.example.com/pets/{petId}");
        assert_eq!(out.1, HttpMethod::Get);
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let url = request(Some("https://api.example.com"))
            .url(Some("http://localhost:8080"))
            .unwrap();
        assert_eq!(url, "http://localhost:8080/pets/{petId}");
    }

    #[test]
    fn test_empty_override_falls_back() {
        let url = request(Some("https://api.example.com")).url(Some("")).unwrap();
        assert_eq!(url, "https://api.example.com/pets/{petId}");
    }

    #[test]
    fn test_missing_base_url() {
        let err = request(None)
            .build_request(&Echo, &RequestArgs::new(), None)
            .unwrap_err();
        assert_eq!(err, EndpointError::MissingBaseUrl);
    }
}
