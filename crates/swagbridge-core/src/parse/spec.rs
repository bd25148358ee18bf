use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::lenient;
use super::operation::PathItem;
use super::server::Servers;

/// A fully dereferenced OpenAPI 3.x / Swagger 2.0 document.
///
/// Only `paths` and `servers` are modelled; every other top-level key
/// (`info`, `components`, `definitions`, ...) is kept verbatim in `extra`.
/// `paths` and `servers` are `Some` whenever the key is present, whatever
/// its value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(
        default,
        deserialize_with = "lenient::present_map",
        skip_serializing_if = "Option::is_none"
    )]
    pub paths: Option<IndexMap<String, PathItem>>,

    #[serde(
        default,
        deserialize_with = "lenient::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub servers: Option<Servers>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl SchemaDocument {
    /// A document with no keys at all counts as "not loaded".
    pub fn is_empty(&self) -> bool {
        self.paths.is_none() && self.servers.is_none() && self.extra.is_empty()
    }

    /// Path items in document order.
    pub fn paths(&self) -> impl Iterator<Item = (&String, &PathItem)> {
        self.paths.iter().flatten()
    }

    pub fn path(&self, path: &str) -> Option<&PathItem> {
        self.paths.as_ref()?.get(path)
    }

    /// Number of (path, method) pairs in the document.
    pub fn operation_count(&self) -> usize {
        self.paths().map(|(_, item)| item.operations.len()).sum()
    }
}
