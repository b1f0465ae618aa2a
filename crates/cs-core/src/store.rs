//! Document store trait and typed collection access
//!
//! A store holds named collections of JSON objects, each keyed by its
//! `_id` field. The trait is deliberately small: insert, lookup by id,
//! equality filtering and delete. Typed access goes through
//! [`Collection`], which converts between [`Record`] types and raw
//! documents.

use crate::error::{CommentServiceError, Result};
use crate::types::{DocumentId, ID_FIELD};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;

/// A stored document: a JSON object
pub type Document = serde_json::Map<String, Value>;

/// Trait for document store implementations
pub trait DocumentStore: Send + Sync {
    /// Insert a document, assigning an `_id` when it has none
    fn insert_one(&self, collection: &str, document: Document) -> Result<DocumentId>;

    /// Load a document by ID
    fn find_one(&self, collection: &str, id: &DocumentId) -> Result<Option<Document>>;

    /// List documents matching a filter
    fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Delete a document by ID, returning whether it existed
    fn delete_one(&self, collection: &str, id: &DocumentId) -> Result<bool>;

    /// Check if a document exists
    fn exists(&self, collection: &str, id: &DocumentId) -> Result<bool> {
        Ok(self.find_one(collection, id)?.is_some())
    }

    /// Count documents in a collection
    fn count(&self, collection: &str) -> Result<usize> {
        Ok(self.find(collection, &Filter::new())?.len())
    }
}

/// Ensure the document carries a valid `_id`, generating one if absent
pub fn assign_id(document: &mut Document) -> Result<DocumentId> {
    let id = match document.get(ID_FIELD) {
        None | Some(Value::Null) => DocumentId::generate(),
        Some(Value::String(s)) => DocumentId::parse(s)?,
        Some(_) => {
            return Err(CommentServiceError::Validation(format!(
                "{} must be a string",
                ID_FIELD
            )))
        }
    };

    document.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(id)
}

/// Collection names double as directory names, so keep them plain
pub fn validate_collection_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(CommentServiceError::Validation(format!(
            "Invalid collection name: {:?}",
            name
        )))
    }
}

/// Top-level field equality filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// Create an empty filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Check a document against every condition
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// A type stored in a named collection
pub trait Record: Serialize + DeserializeOwned {
    /// Collection the record lives in
    const COLLECTION: &'static str;

    /// Human-readable kind, used in not-found errors
    const KIND: &'static str;
}

/// Convert a serializable value into a document
pub fn to_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(CommentServiceError::Store(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// Convert a document back into a typed value
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Typed view over one collection of a store
pub struct Collection<'a, T> {
    store: &'a dyn DocumentStore,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Record> Collection<'a, T> {
    /// Create a typed view over the record's collection
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Insert a record
    pub fn insert_one(&self, record: &T) -> Result<DocumentId> {
        self.store.insert_one(T::COLLECTION, to_document(record)?)
    }

    /// Find a record by ID
    pub fn find_by_id(&self, id: &DocumentId) -> Result<Option<T>> {
        self.store
            .find_one(T::COLLECTION, id)?
            .map(from_document)
            .transpose()
    }

    /// Get a record by ID, failing with a not-found error
    pub fn get(&self, id: &DocumentId) -> Result<T> {
        self.find_by_id(id)?
            .ok_or_else(|| CommentServiceError::not_found(T::KIND, id))
    }

    /// Find records matching a filter
    pub fn find(&self, filter: &Filter) -> Result<Vec<T>> {
        self.store
            .find(T::COLLECTION, filter)?
            .into_iter()
            .map(from_document)
            .collect()
    }

    /// Delete a record by ID; missing records are not an error
    pub fn delete_one(&self, id: &DocumentId) -> Result<bool> {
        self.store.delete_one(T::COLLECTION, id)
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        #[serde(rename = "_id")]
        id: DocumentId,
        name: String,
    }

    impl Record for Widget {
        const COLLECTION: &'static str = "widgets";
        const KIND: &'static str = "Widget";
    }

    fn widget(name: &str) -> Widget {
        Widget {
            id: DocumentId::generate(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_assign_id_generates_when_missing() {
        let mut doc = to_document(&json!({ "name": "a" })).unwrap();
        let id = assign_id(&mut doc).unwrap();
        assert_eq!(doc.get(ID_FIELD), Some(&Value::String(id.to_string())));
    }

    #[test]
    fn test_assign_id_keeps_existing() {
        let mut doc = to_document(&json!({ "_id": "65A1B2C3D4E5F60718293A4B" })).unwrap();
        let id = assign_id(&mut doc).unwrap();
        assert_eq!(id.as_str(), "65a1b2c3d4e5f60718293a4b");
        assert_eq!(doc.get(ID_FIELD), Some(&json!("65a1b2c3d4e5f60718293a4b")));
    }

    #[test]
    fn test_assign_id_rejects_bad_ids() {
        let mut doc = to_document(&json!({ "_id": 42 })).unwrap();
        assert!(assign_id(&mut doc).is_err());

        let mut doc = to_document(&json!({ "_id": "short" })).unwrap();
        assert!(assign_id(&mut doc).is_err());
    }

    #[test]
    fn test_collection_names() {
        assert!(validate_collection_name("comments").is_ok());
        assert!(validate_collection_name("audit_log-2").is_ok());
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name("../etc").is_err());
        assert!(validate_collection_name("a/b").is_err());
    }

    #[test]
    fn test_filter_matches() {
        let doc = to_document(&json!({ "name": "a", "stock": 3 })).unwrap();
        assert!(Filter::new().matches(&doc));
        assert!(Filter::new().eq("name", "a").matches(&doc));
        assert!(Filter::new().eq("name", "a").eq("stock", 3).matches(&doc));
        assert!(!Filter::new().eq("name", "b").matches(&doc));
        assert!(!Filter::new().eq("missing", "a").matches(&doc));
    }

    #[test]
    fn test_to_document_requires_object() {
        assert!(to_document(&json!([1, 2])).is_err());
        assert!(to_document(&"text").is_err());
    }

    #[test]
    fn test_collection_round_trip() {
        let store = MemoryStore::new();
        let widgets = Collection::<Widget>::new(&store);
        let w = widget("gear");

        let id = widgets.insert_one(&w).unwrap();
        assert_eq!(id, w.id);
        assert_eq!(widgets.find_by_id(&id).unwrap(), Some(w.clone()));
        assert_eq!(widgets.get(&id).unwrap(), w);
        assert_eq!(widgets.find(&Filter::new().eq("name", "gear")).unwrap().len(), 1);
    }

    #[test]
    fn test_collection_get_missing_is_not_found() {
        let store = MemoryStore::new();
        let widgets = Collection::<Widget>::new(&store);
        let err = widgets.get(&DocumentId::generate()).unwrap_err();
        assert_eq!(err.reason_phrase(), "WidgetNotFoundError");
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let store = MemoryStore::new();
        let widgets = Collection::<Widget>::new(&store);
        let w = widget("gear");

        widgets.insert_one(&w).unwrap();
        let err = widgets.insert_one(&w).unwrap_err();
        assert!(matches!(err, CommentServiceError::DuplicateKey { .. }));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let widgets = Collection::<Widget>::new(&store);
        let w = widget("gear");

        widgets.insert_one(&w).unwrap();
        assert!(widgets.delete_one(&w.id).unwrap());
        assert!(!widgets.delete_one(&w.id).unwrap());
        assert!(widgets.find_by_id(&w.id).unwrap().is_none());
    }
}
