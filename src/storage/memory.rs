//! In-process document store with JSON snapshot persistence.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentStore, StorageError, ID_FIELD};

type CollectionKey = (String, String);

/// On-disk layout: database → collection → documents.
type Snapshot = BTreeMap<String, BTreeMap<String, Vec<Document>>>;

/// A thread-safe document store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    /// (database, collection) → documents in insertion order.
    inner: Arc<DashMap<CollectionKey, Vec<Document>>>,
    persistence_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            persistence_path,
        }
    }

    /// Load from a snapshot file if it exists. Later saves go to the same path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let store = Self::new(Some(path.to_path_buf()));

        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let snapshot: Snapshot = serde_json::from_reader(reader)?;

            let mut total = 0;
            for (db, collections) in snapshot {
                for (collection, docs) in collections {
                    for doc in docs {
                        store.insert_one(&db, &collection, doc)?;
                        total += 1;
                    }
                }
            }
            tracing::info!(path = %path.display(), documents = total, "Loaded storage snapshot");
        }

        Ok(store)
    }

    /// Write every collection to the snapshot file, if one is configured.
    pub fn save_to_file(&self) -> Result<(), StorageError> {
        let Some(path) = &self.persistence_path else {
            return Ok(());
        };

        let mut snapshot = Snapshot::new();
        let mut total = 0;
        for entry in self.inner.iter() {
            let (db, collection) = entry.key();
            total += entry.value().len();
            snapshot
                .entry(db.clone())
                .or_default()
                .insert(collection.clone(), entry.value().clone());
        }

        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        tracing::info!(path = %path.display(), documents = total, "Saved storage snapshot");
        Ok(())
    }

    /// Number of documents in a collection.
    pub fn count(&self, db: &str, collection: &str) -> usize {
        self.inner
            .get(&key(db, collection))
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn key(db: &str, collection: &str) -> CollectionKey {
    (db.to_string(), collection.to_string())
}

fn doc_id(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

/// Type rank used when sorting mixed values: missing/null, numbers,
/// strings, objects, arrays, booleans.
fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Ordering for sort fields. ISO-8601 timestamps compare correctly as strings.
pub(crate) fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

impl DocumentStore for MemoryStore {
    fn find_all(&self, db: &str, collection: &str) -> Result<Vec<Document>, StorageError> {
        Ok(self
            .inner
            .get(&key(db, collection))
            .map(|docs| docs.value().clone())
            .unwrap_or_default())
    }

    fn find_one(&self, db: &str, collection: &str, id: &str) -> Result<Option<Document>, StorageError> {
        Ok(self.inner.get(&key(db, collection)).and_then(|docs| {
            docs.iter().find(|d| doc_id(d) == Some(id)).cloned()
        }))
    }

    fn find_latest(
        &self,
        db: &str,
        collection: &str,
        sort_field: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError> {
        let Some(docs) = self.inner.get(&key(db, collection)) else {
            return Ok(Vec::new());
        };

        // Newest insertion first so the stable sort breaks ties that way.
        let mut sorted: Vec<&Document> = docs.iter().rev().collect();
        sorted.sort_by(|a, b| compare_values(b.get(sort_field), a.get(sort_field)));

        Ok(sorted.into_iter().take(limit).cloned().collect())
    }

    fn insert_one(&self, db: &str, collection: &str, mut doc: Document) -> Result<String, StorageError> {
        let id = match doc.get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(_) => {
                return Err(StorageError::InvalidId {
                    collection: collection.to_string(),
                })
            }
            None => {
                let id = Uuid::new_v4().simple().to_string();
                doc.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        let mut docs = self.inner.entry(key(db, collection)).or_default();
        if docs.iter().any(|d| doc_id(d) == Some(id.as_str())) {
            return Err(StorageError::DuplicateKey {
                collection: collection.to_string(),
                id,
            });
        }
        docs.push(doc);
        Ok(id)
    }

    fn update_one(&self, db: &str, collection: &str, id: &str, fields: Document) -> Result<bool, StorageError> {
        let Some(mut docs) = self.inner.get_mut(&key(db, collection)) else {
            return Ok(false);
        };

        match docs.iter_mut().find(|d| doc_id(d) == Some(id)) {
            Some(doc) => {
                for (field, value) in fields {
                    if field != ID_FIELD {
                        doc.insert(field, value);
                    }
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_one(&self, db: &str, collection: &str, id: &str) -> Result<bool, StorageError> {
        let Some(mut docs) = self.inner.get_mut(&key(db, collection)) else {
            return Ok(false);
        };

        match docs.iter().position(|d| doc_id(d) == Some(id)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
