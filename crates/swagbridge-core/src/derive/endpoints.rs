use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::endpoint::{EndpointDescriptor, EndpointMap, EndpointParameter, EndpointRequest};
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::Parameter;
use crate::parse::response::Response;
use crate::parse::spec::SchemaDocument;

use super::name_normalizer::{sanitize_parameter_name, type_name_from_route};
use super::server_url::resolve_server_url;

/// Derive one endpoint per (path, method) pair of `schema`.
///
/// Entries are keyed by `operationId`, or by a name built from the method and
/// path. The server URL is resolved once here and captured by every
/// endpoint. When two operations end up with the same name the later one
/// replaces the earlier.
pub fn get_all_endpoints(schema: &SchemaDocument) -> EndpointMap {
    let base_url = resolve_server_url(schema);
    let mut endpoints = EndpointMap::new();

    for (path, item) in schema.paths() {
        for (&method, operation) in &item.operations {
            let name = operation
                .operation_id
                .clone()
                .unwrap_or_else(|| type_name_from_route(method.as_str(), path));
            let endpoint = build_endpoint(path, method, operation, base_url.as_deref());
            if endpoints.insert(name.clone(), endpoint).is_some() {
                log::warn!(
                    "duplicate endpoint name `{name}`: {method} {path} replaces the earlier entry"
                );
            }
        }
    }

    log::debug!("derived {} endpoints", endpoints.len());
    endpoints
}

/// Rename endpoints according to `aliases` (derived name -> alias), keeping
/// document order. Names without an alias are left alone.
pub fn apply_aliases(endpoints: EndpointMap, aliases: &IndexMap<String, String>) -> EndpointMap {
    if aliases.is_empty() {
        return endpoints;
    }
    let mut renamed = EndpointMap::with_capacity(endpoints.len());
    for (name, endpoint) in endpoints {
        let name = aliases.get(&name).cloned().unwrap_or(name);
        if renamed.insert(name.clone(), endpoint).is_some() {
            log::warn!("alias `{name}` collides with another endpoint; the later one wins");
        }
    }
    renamed
}

fn build_endpoint(
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    base_url: Option<&str>,
) -> EndpointDescriptor {
    EndpointDescriptor {
        parameters: operation.parameters.iter().map(endpoint_parameter).collect(),
        description: operation.description.clone(),
        response: success_response(operation.responses.as_ref()),
        mutation: method.is_mutation(),
        request: EndpointRequest {
            operation: Arc::new(operation.clone()),
            path: path.to_string(),
            method,
            base_url: base_url.map(str::to_owned),
        },
    }
}

fn endpoint_parameter(param: &Parameter) -> EndpointParameter {
    EndpointParameter {
        name: sanitize_parameter_name(&param.name),
        param_type: param.primitive_type(),
        json_schema: param.raw.clone(),
    }
}

/// Schema of the first response, in document order, whose status code starts
/// with `2`. Later 2xx codes are never looked at.
pub fn success_response(responses: Option<&IndexMap<String, Response>>) -> Option<Value> {
    responses?
        .iter()
        .find(|(code, _)| code.starts_with('2'))
        .and_then(|(_, response)| response.body_schema())
}
