use super::{validate_key, DocumentStore, StoredDocument};
use crate::error::{MarksError, Result};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

const DOCUMENT_EXTENSION: &str = "json";

/// One directory per collection, one `<key>.json` file per document.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        validate_key(collection)?;
        Ok(self.root.join(collection))
    }

    fn document_path(&self, collection: &str, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .collection_dir(collection)?
            .join(format!("{key}.{DOCUMENT_EXTENSION}")))
    }

    fn read_document(path: &Path) -> std::io::Result<Option<Value>> {
        let content = fs::read(path)?;
        match serde_json::from_slice(&content) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping malformed document");
                Ok(None)
            }
        }
    }
}

/// Writes a freshly created document; on failure the partial file is removed.
fn write_or_remove(path: &Path, mut out: impl Write, bytes: &[u8]) -> std::io::Result<()> {
    let written = out.write_all(bytes).and_then(|()| out.flush());
    drop(out);
    if written.is_err() {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), %cleanup, "failed to remove partial document");
        }
    }
    written
}

fn read_error(collection: &str, error: impl std::fmt::Display) -> MarksError {
    MarksError::StoreRead {
        collection: collection.to_string(),
        message: error.to_string(),
    }
}

fn write_error(collection: &str, key: &str, error: impl std::fmt::Display) -> MarksError {
    MarksError::StoreWrite {
        collection: collection.to_string(),
        key: key.to_string(),
        message: error.to_string(),
    }
}

impl DocumentStore for FsStore {
    fn list(&self, collection: &str) -> Result<Vec<StoredDocument>> {
        let dir = self.collection_dir(collection)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(read_error(
                collection,
                format!("{} is not a directory", dir.display()),
            ));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|error| read_error(collection, error))?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION)
            {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            // only keys that `get` and `delete` can address are listed
            if validate_key(key).is_err() {
                warn!(path = %path.display(), "skipping document with unaddressable key");
                continue;
            }
            if let Some(body) =
                Self::read_document(path).map_err(|error| read_error(collection, error))?
            {
                documents.push(StoredDocument {
                    key: key.to_string(),
                    body,
                });
            }
        }
        Ok(documents)
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Value>> {
        let path = self.document_path(collection, key)?;
        match Self::read_document(&path) {
            Ok(value) => Ok(value),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(read_error(collection, error)),
        }
    }

    fn create(&self, collection: &str, key: &str, body: &Value) -> Result<()> {
        let path = self.document_path(collection, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| write_error(collection, key, error))?;
        }
        let json = serde_json::to_string_pretty(body)?;

        // create_new makes the existence check and the write one step
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                return Err(MarksError::DocumentExists {
                    collection: collection.to_string(),
                    key: key.to_string(),
                });
            }
            Err(error) => return Err(write_error(collection, key, error)),
        };
        write_or_remove(&path, file, json.as_bytes())
            .map_err(|error| write_error(collection, key, error))?;
        info!(collection, key, "created document");
        Ok(())
    }

    fn delete(&self, collection: &str, key: &str) -> Result<()> {
        let path = self.document_path(collection, key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(collection, key, "deleted document");
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(write_error(collection, key, error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn create_then_get_round_trips_document() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        let body = json!({"judge": "A", "category": "boys"});

        store
            .create("scores", "boys_a", &body)
            .expect("create should succeed");
        let loaded = store.get("scores", "boys_a").expect("get should succeed");
        assert_eq!(loaded, Some(body));
        assert_eq!(store.get("scores", "missing").expect("get ok"), None);
    }

    #[test]
    fn create_rejects_existing_key() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        store
            .create("scores", "boys_a", &json!({"n": 1}))
            .expect("first create should succeed");

        let second = store.create("scores", "boys_a", &json!({"n": 2}));
        assert!(matches!(second, Err(MarksError::DocumentExists { .. })));
        assert_eq!(
            store.get("scores", "boys_a").expect("get ok"),
            Some(json!({"n": 1}))
        );
    }

    #[test]
    fn list_is_sorted_and_skips_malformed_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        store.create("scores", "b", &json!({"n": 2})).expect("create b");
        store.create("scores", "a", &json!({"n": 1})).expect("create a");
        fs::write(dir.path().join("scores/broken.json"), "{not json").expect("broken write");
        fs::write(dir.path().join("scores/notes.txt"), "ignored").expect("notes write");

        let keys: Vec<_> = store
            .list("scores")
            .expect("list should succeed")
            .into_iter()
            .map(|doc| doc.key)
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_leaves_key_free_for_retry() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        fs::create_dir_all(dir.path().join("scores")).expect("dir");
        let path = dir.path().join("scores/boys_a.json");
        fs::write(&path, "{\"partial").expect("partial write");

        assert!(write_or_remove(&path, FailingWriter, b"{}").is_err());
        assert!(!path.exists());
        store
            .create("scores", "boys_a", &json!({"n": 1}))
            .expect("retry should succeed");
    }

    #[test]
    fn list_skips_non_utf8_file_and_keeps_good_documents() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        store.create("scores", "good", &json!({"n": 1})).expect("create good");
        fs::write(dir.path().join("scores/bad.json"), [0xff, 0xfe, b'{', b'}'])
            .expect("bad write");

        let documents = store.list("scores").expect("list should succeed");
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].key, "good");
        assert_eq!(store.get("scores", "bad").expect("get ok"), None);
    }

    #[test]
    fn list_only_returns_deletable_keys() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        fs::create_dir_all(dir.path().join("judges_scores")).expect("dir");
        fs::write(dir.path().join("judges_scores/week 1.json"), r#"{"Aravali": {"items": 3}}"#)
            .expect("spaced write");
        store
            .create("judges_scores", "week-2", &json!({"Aravali": {"items": 4}}))
            .expect("create week-2");

        let documents = store.list("judges_scores").expect("list should succeed");
        let keys: Vec<_> = documents.iter().map(|doc| doc.key.as_str()).collect();
        assert_eq!(keys, ["week-2"]);
        for doc in &documents {
            store
                .delete("judges_scores", &doc.key)
                .expect("every listed key should delete");
        }
        assert!(store.list("judges_scores").expect("list").is_empty());
    }

    #[test]
    fn missing_collection_lists_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        assert!(store.list("judges").expect("list ok").is_empty());
    }

    #[test]
    fn unreadable_collection_is_a_read_error() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("scores"), "a file, not a directory").expect("write");
        let store = FsStore::new(dir.path());
        assert!(matches!(
            store.list("scores"),
            Err(MarksError::StoreRead { .. })
        ));
    }

    #[test]
    fn scan_where_filters_on_field_equality() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        store
            .create("judges", "j1", &json!({"name": "Asha"}))
            .expect("create j1");
        store
            .create("judges", "j2", &json!({"name": "Ravi"}))
            .expect("create j2");

        let found = store
            .scan_where("judges", "name", &json!("Ravi"))
            .expect("scan ok");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, "j2");
    }

    #[test]
    fn delete_removes_document_and_ignores_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = FsStore::new(dir.path());
        store.create("scores", "k", &json!({})).expect("create");
        store.delete("scores", "k").expect("delete");
        store.delete("scores", "k").expect("second delete is a no-op");
        assert!(store.list("scores").expect("list").is_empty());
    }
}
