//! The document store seam.
//!
//! Repositories talk to storage only through [`DocumentStore`], which offers
//! the handful of primitives the data-access layer needs: point reads, batch
//! reads, conflict-checked insert, upsert, delete and filtered scans.

pub mod filter;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
pub use filter::Filter;
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A key/value store of JSON documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by key.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Fetch several documents by key.
    ///
    /// The result follows the order of `keys`; keys with no document are
    /// skipped.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Value>, StoreError>;

    /// Store a new document. Fails with [`StoreError::Conflict`] if `key`
    /// is already taken.
    async fn insert(&self, key: &str, doc: &Value) -> Result<(), StoreError>;

    /// Create or replace a document.
    async fn upsert(&self, key: &str, doc: &Value) -> Result<(), StoreError>;

    /// Delete a document. Returns `true` if one was removed.
    async fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// All documents matching `filter`, oldest first.
    async fn find(&self, filter: &Filter) -> Result<Vec<Value>, StoreError>;

    /// Verify the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
