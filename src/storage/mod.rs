//! Document storage subsystem.
//!
//! # Data Flow
//! ```text
//! API handlers
//!     → manager.rs (typed operations per collection)
//!     → DocumentStore (find / insert / update / delete on JSON documents)
//!     → memory.rs (concurrent in-process store, JSON snapshot on disk)
//! ```
//!
//! # Design Decisions
//! - Documents are JSON objects keyed by a string `_id`
//! - Collections are addressed by (database, collection) name pairs
//! - The store never interprets document contents beyond `_id` and the
//!   requested sort field

pub mod manager;
pub mod memory;

use serde_json::{Map, Value};
use thiserror::Error;

pub use manager::DbManager;
pub use memory::MemoryStore;

/// A stored JSON document.
pub type Document = Map<String, Value>;

/// Primary-key field of every document.
pub const ID_FIELD: &str = "_id";

/// Errors raised by document stores.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("duplicate key '{id}' in {collection}")]
    DuplicateKey { collection: String, id: String },

    #[error("document in {collection} has a non-string _id")]
    InvalidId { collection: String },

    #[error("malformed document in {collection}: {source}")]
    Corrupt {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Minimal document-database contract used by the API.
pub trait DocumentStore: Send + Sync {
    /// Every document in insertion order.
    fn find_all(&self, db: &str, collection: &str) -> Result<Vec<Document>, StorageError>;

    fn find_one(&self, db: &str, collection: &str, id: &str) -> Result<Option<Document>, StorageError>;

    /// Up to `limit` documents ordered by `sort_field` descending; ties put
    /// the most recently inserted document first.
    fn find_latest(
        &self,
        db: &str,
        collection: &str,
        sort_field: &str,
        limit: usize,
    ) -> Result<Vec<Document>, StorageError>;

    /// Insert a document, assigning an `_id` when it has none. Returns the id.
    fn insert_one(&self, db: &str, collection: &str, doc: Document) -> Result<String, StorageError>;

    /// Overwrite `fields` on the document with the given id.
    /// Returns false when no document matched.
    fn update_one(&self, db: &str, collection: &str, id: &str, fields: Document) -> Result<bool, StorageError>;

    /// Returns false when no document matched.
    fn delete_one(&self, db: &str, collection: &str, id: &str) -> Result<bool, StorageError>;
}
