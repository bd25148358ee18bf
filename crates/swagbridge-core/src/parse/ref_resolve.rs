use std::collections::{HashMap, HashSet};

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::load::{Location, read_value};

/// Replaces every `$ref` node in a document with the value it points at,
/// following references into other files and URLs. Referenced documents are
/// fetched once per resolver. Circular references are left as `$ref` nodes.
#[derive(Debug, Default)]
pub struct RefResolver {
    documents: HashMap<Location, Value>,
    active: HashSet<String>,
}

impl RefResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `root`, the already read content of `location`.
    pub fn resolve_document(
        &mut self,
        root: Value,
        location: &Location,
    ) -> Result<Value, ResolveError> {
        self.documents.insert(location.clone(), root.clone());
        self.resolve_value(&root, location)
    }

    fn resolve_value(&mut self, value: &Value, base: &Location) -> Result<Value, ResolveError> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(ref_path)) = map.get("$ref") {
                    return self.resolve_ref(ref_path, value, base);
                }
                let mut resolved = Map::with_capacity(map.len());
                for (key, child) in map {
                    resolved.insert(key.clone(), self.resolve_value(child, base)?);
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, base))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn resolve_ref(
        &mut self,
        ref_path: &str,
        node: &Value,
        base: &Location,
    ) -> Result<Value, ResolveError> {
        let (document_part, pointer) = split_ref(ref_path)?;
        let target_location = if document_part.is_empty() {
            base.clone()
        } else {
            base.join(document_part)
                .map_err(|source| ResolveError::External {
                    location: document_part.to_string(),
                    source: Box::new(source),
                })?
        };

        let key = format!("{target_location}#{pointer}");
        if self.active.contains(&key) {
            // Circular reference: keep the pointer instead of expanding forever.
            return Ok(node.clone());
        }

        let target = {
            let document = self.document(&target_location)?;
            lookup_pointer(document, pointer)
                .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?
                .clone()
        };

        self.active.insert(key.clone());
        let resolved = self.resolve_value(&target, &target_location);
        self.active.remove(&key);
        resolved
    }

    fn document(&mut self, location: &Location) -> Result<&Value, ResolveError> {
        if !self.documents.contains_key(location) {
            log::debug!("fetching referenced document {location}");
            let value = read_value(location).map_err(|source| ResolveError::External {
                location: location.to_string(),
                source: Box::new(source),
            })?;
            self.documents.insert(location.clone(), value);
        }
        Ok(&self.documents[location])
    }
}

/// Split `other.yaml#/a/b` into the document part and the JSON pointer.
fn split_ref(ref_path: &str) -> Result<(&str, &str), ResolveError> {
    let (document_part, pointer) = ref_path.split_once('#').unwrap_or((ref_path, ""));
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
    }
    if document_part.is_empty() && pointer.is_empty() && !ref_path.starts_with('#') {
        return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok((document_part, pointer))
}

/// Walk a JSON pointer. Tokens are percent-decoded, then `~1` / `~0`
/// unescaped.
fn lookup_pointer<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(document);
    }
    pointer
        .strip_prefix('/')?
        .split('/')
        .try_fold(document, |current, raw_token| {
            let decoded = percent_decode_str(raw_token).decode_utf8_lossy();
            let token = decoded.replace("~1", "/").replace("~0", "~");
            match current {
                Value::Object(map) => map.get(&token),
                Value::Array(items) => token.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }
        })
}
