//! In-memory document store

use cs_core::error::{CommentServiceError, Result};
use cs_core::store::{assign_id, validate_collection_name, Document, DocumentStore, Filter};
use cs_core::types::DocumentId;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

type Collections = HashMap<String, BTreeMap<DocumentId, Document>>;

/// Process-local document store; contents are lost on drop
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| CommentServiceError::Store("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| CommentServiceError::Store("memory store lock poisoned".to_string()))
    }
}

impl DocumentStore for MemoryStore {
    fn insert_one(&self, collection: &str, mut document: Document) -> Result<DocumentId> {
        validate_collection_name(collection)?;
        let id = assign_id(&mut document)?;

        let mut collections = self.write()?;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(CommentServiceError::DuplicateKey {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        docs.insert(id.clone(), document);

        debug!("Inserted {}/{}", collection, id);
        Ok(id)
    }

    fn find_one(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>> {
        validate_collection_name(collection)?;
        Ok(self
            .read()?
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
        validate_collection_name(collection)?;
        Ok(self
            .read()?
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_one(&self, collection: &str, id: &DocumentId) -> Result<bool> {
        validate_collection_name(collection)?;
        let removed = self
            .write()?
            .get_mut(collection)
            .map(|docs| docs.remove(id).is_some())
            .unwrap_or(false);

        if removed {
            debug!("Deleted {}/{}", collection, id);
        }
        Ok(removed)
    }

    fn count(&self, collection: &str) -> Result<usize> {
        validate_collection_name(collection)?;
        Ok(self.read()?.get(collection).map(BTreeMap::len).unwrap_or(0))
    }
}
