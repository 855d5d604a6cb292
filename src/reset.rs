use crate::extract::normalize_category;
use crate::store::{DocumentStore, StoredDocument};
use crate::types::config::MarksConfig;
use crate::types::summary::CollectionFailure;
use serde_json::json;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDelete {
    pub collection: String,
    pub key: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ResetOutcome {
    pub deleted: usize,
    pub failed_deletes: Vec<FailedDelete>,
    pub unreadable: Vec<CollectionFailure>,
}

impl ResetOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_deletes.is_empty() && self.unreadable.is_empty()
    }
}

/// Deletes documents one at a time. Nothing is rolled back when a delete fails.
///
/// With a category only score documents of that category go; otherwise every
/// judge registration and every score document is removed.
pub fn reset(store: &dyn DocumentStore, config: &MarksConfig, category: Option<&str>) -> ResetOutcome {
    let mut outcome = ResetOutcome::default();
    let category = category.map(normalize_category);

    let mut collections = Vec::new();
    if category.is_none() {
        collections.push(config.store.judges_collection.as_str());
    }
    collections.extend(config.score_collections());

    for collection in collections {
        let documents = match &category {
            Some(category) => store.scan_where(collection, "category", &json!(category)),
            None => store.list(collection),
        };
        match documents {
            Ok(documents) => delete_all(store, collection, &documents, &mut outcome),
            Err(error) => {
                warn!(collection, %error, "cannot read collection for reset");
                outcome.unreadable.push(CollectionFailure {
                    collection: collection.to_string(),
                    message: error.to_string(),
                });
            }
        }
    }
    info!(
        deleted = outcome.deleted,
        failed = outcome.failed_deletes.len(),
        "reset finished"
    );
    outcome
}

fn delete_all(
    store: &dyn DocumentStore,
    collection: &str,
    documents: &[StoredDocument],
    outcome: &mut ResetOutcome,
) {
    for document in documents {
        match store.delete(collection, &document.key) {
            Ok(()) => outcome.deleted += 1,
            Err(error) => {
                warn!(collection, key = %document.key, %error, "delete failed");
                outcome.failed_deletes.push(FailedDelete {
                    collection: collection.to_string(),
                    key: document.key.clone(),
                    message: error.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn seeded_store() -> MemoryStore {
        MemoryStore::new()
            .with_document("judges", "j1", json!({"name": "Asha"}))
            .with_document("scores", "boys_j1", json!({"category": "boys"}))
            .with_document("scores", "girls_j1", json!({"category": "girls"}))
            .with_document("judges_scores", "old", json!({"Aravali": {"grass": 1}}))
    }

    #[test]
    fn full_reset_clears_judges_and_scores() {
        let store = seeded_store();
        let outcome = reset(&store, &MarksConfig::default(), None);

        assert!(outcome.is_complete());
        assert_eq!(outcome.deleted, 4);
        assert_eq!(store.len("judges"), 0);
        assert_eq!(store.len("scores"), 0);
        assert_eq!(store.len("judges_scores"), 0);
    }

    #[test]
    fn category_reset_keeps_other_documents() {
        let store = seeded_store();
        let outcome = reset(&store, &MarksConfig::default(), Some(" Boys "));

        assert_eq!(outcome.deleted, 1);
        assert_eq!(store.len("judges"), 1);
        assert_eq!(store.len("scores"), 1);
        assert!(store.get("scores", "girls_j1").expect("get").is_some());
    }

    #[test]
    fn failed_deletes_leave_partial_state() {
        let store = seeded_store().failing_deletes("girls_j1");
        let outcome = reset(&store, &MarksConfig::default(), None);

        assert!(!outcome.is_complete());
        assert_eq!(outcome.deleted, 3);
        assert_eq!(outcome.failed_deletes[0].key, "girls_j1");
        assert_eq!(store.len("scores"), 1);
    }

    #[test]
    fn unreadable_collection_does_not_stop_reset() {
        let store = seeded_store().failing_reads("judges");
        let outcome = reset(&store, &MarksConfig::default(), None);

        assert_eq!(outcome.unreadable.len(), 1);
        assert_eq!(outcome.deleted, 3);
    }
}
