use super::{validate_key, DocumentStore, StoredDocument};
use crate::error::{MarksError, Result};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<BTreeMap<String, BTreeMap<String, Value>>>,
    failing_reads: BTreeSet<String>,
    failing_deletes: BTreeSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, collection: &str, key: &str, body: Value) -> Self {
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), body);
        self
    }

    pub fn failing_reads(mut self, collection: &str) -> Self {
        self.failing_reads.insert(collection.to_string());
        self
    }

    pub fn failing_deletes(mut self, key: &str) -> Self {
        self.failing_deletes.insert(key.to_string());
        self
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .borrow()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

impl DocumentStore for MemoryStore {
    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        if self.failing_reads.contains(collection) {
            return Err(MarksError::StoreRead {
                collection: collection.to_string(),
                message: "permission denied".to_string(),
            });
        }
        Ok(self
            .collections
            .borrow()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(key, body)| StoredDocument {
                        key: key.clone(),
                        body: body.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        Ok(self
            .collections
            .borrow()
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    fn create(&self, collection: &str, key: &str, body: &Value) -> Result<()> {
        validate_key(key)?;
        let mut collections = self.collections.borrow_mut();
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(key) {
            return Err(MarksError::DocumentExists {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        }
        docs.insert(key.to_string(), body.clone());
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> Result<()> {
        if self.failing_deletes.contains(key) {
            return Err(MarksError::StoreWrite {
                collection: collection.to_string(),
                key: key.to_string(),
                message: "permission denied".to_string(),
            });
        }
        if let Some(docs) = self.collections.borrow_mut().get_mut(collection) {
            docs.remove(key);
        }
        Ok(())
    }
}
