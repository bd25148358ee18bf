use std::sync::{Arc, PoisonError, RwLock};

use crate::error::SchemaError;
use crate::load;
use crate::parse::spec::SchemaDocument;

/// Holds the currently loaded schema document.
///
/// The store is owned by the caller; several stores can live side by side.
/// Loads are not coordinated with each other: whichever load finishes last
/// decides the current document. A failed load leaves the previous document
/// in place.
#[derive(Debug, Default)]
pub struct SchemaStore {
    current: RwLock<Option<Arc<SchemaDocument>>>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded document. Fails when nothing was loaded, or when the loaded
    /// document is empty.
    pub fn get_schema(&self) -> Result<Arc<SchemaDocument>, SchemaError> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        match current.as_ref() {
            Some(document) if !document.is_empty() => Ok(Arc::clone(document)),
            _ => Err(SchemaError::NotLoaded),
        }
    }

    /// Load, dereference and store the document at `path_or_url`.
    pub fn load_schema(&self, path_or_url: &str) -> Result<Arc<SchemaDocument>, SchemaError> {
        let document = load::load_document(path_or_url)?;
        Ok(self.set_schema(document))
    }

    /// Store an already parsed document, replacing the current one.
    pub fn set_schema(&self, document: SchemaDocument) -> Arc<SchemaDocument> {
        let document = Arc::new(document);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&document));
        document
    }

    pub fn is_loaded(&self) -> bool {
        self.get_schema().is_ok()
    }
}
