pub mod fs;
#[cfg(test)]
pub mod memory;

use crate::error::{MarksError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub key: String,
    pub body: Value,
}

/// A keyed document database addressed by named collections.
pub trait DocumentStore {
    /// All documents in a collection, ordered by key.
    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>>;

    fn get(&self, collection: &str, key: &str) -> Result<Option<Value>>;

    /// Writes only when no document holds `key`; otherwise `DocumentExists`.
    fn create(&self, collection: &str, key: &str, body: &Value) -> Result<()>;

    fn delete(&self, collection: &str, key: &str) -> Result<()>;

    fn scan_where(&self, collection: &str, field: &str, value: &Value) -> Result<Vec<StoredDocument>> {
        Ok(self
            .list(collection)?
            .into_iter()
            .filter(|doc| doc.body.get(field) == Some(value))
            .collect())
    }
}

/// Keys become file names, so only a conservative character set is accepted.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(MarksError::InvalidDocumentKey(key.to_string()))
    }
}
