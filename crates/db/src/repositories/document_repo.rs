//! Kind-agnostic document utilities.

use serde_json::Value;

use crate::error::StoreError;
use crate::store::{DocumentStore, Filter};

/// Raw access to stored documents regardless of their `_type`.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Every stored document in creation order.
    pub async fn list_all(store: &dyn DocumentStore) -> Result<Vec<Value>, StoreError> {
        store.find(&Filter::All).await
    }

    /// The document under `document_id`, as a zero- or one-element list.
    pub async fn get(
        store: &dyn DocumentStore,
        document_id: &str,
    ) -> Result<Vec<Value>, StoreError> {
        Ok(store.get(document_id).await?.into_iter().collect())
    }

    /// Delete by key. Returns `true` if a document was removed.
    pub async fn delete(store: &dyn DocumentStore, document_id: &str) -> Result<bool, StoreError> {
        let deleted = store.remove(document_id).await?;
        if deleted {
            tracing::info!(document_id, "Document deleted");
        }
        Ok(deleted)
    }
}
