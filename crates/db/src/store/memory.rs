//! In-process [`DocumentStore`] used by tests and `STORE_BACKEND=memory`.

use async_trait::async_trait;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{DocumentStore, Filter};
use crate::error::StoreError;

/// Documents held in an insertion-ordered map behind a `RwLock`.
///
/// Replacing an existing key keeps its original position, so scans return
/// documents in creation order just like the PostgreSQL backend.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<IndexMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.docs.read().await.get(key).cloned())
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Value>, StoreError> {
        let docs = self.docs.read().await;
        Ok(keys.iter().filter_map(|k| docs.get(k).cloned()).collect())
    }

    async fn insert(&self, key: &str, doc: &Value) -> Result<(), StoreError> {
        match self.docs.write().await.entry(key.to_string()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "document with key '{key}' already exists"
            ))),
            Entry::Vacant(slot) => {
                slot.insert(doc.clone());
                Ok(())
            }
        }
    }

    async fn upsert(&self, key: &str, doc: &Value) -> Result<(), StoreError> {
        self.docs.write().await.insert(key.to_string(), doc.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.docs.write().await.shift_remove(key).is_some())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.values().filter(|d| filter.matches(d)).cloned().collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[tokio::test]
    async fn insert_twice_conflicts() {
        let store = MemoryDocumentStore::new();
        store.insert("alice", &json!({"_id": "alice"})).await.unwrap();
        let err = store.insert("alice", &json!({"_id": "alice"})).await.unwrap_err();
        assert_matches!(err, StoreError::Conflict(msg) if msg.contains("alice"));
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = MemoryDocumentStore::new();
        store.upsert("a", &json!({"n": 1})).await.unwrap();
        store.upsert("b", &json!({"n": 2})).await.unwrap();
        store.upsert("a", &json!({"n": 3})).await.unwrap();

        let all = store.find(&Filter::All).await.unwrap();
        assert_eq!(all, vec![json!({"n": 3}), json!({"n": 2})]);
    }

    #[tokio::test]
    async fn get_many_skips_missing_and_keeps_key_order() {
        let store = MemoryDocumentStore::new();
        store.upsert("a", &json!("A")).await.unwrap();
        store.upsert("b", &json!("B")).await.unwrap();

        let keys = vec!["b".to_string(), "zzz".to_string(), "a".to_string()];
        let docs = store.get_many(&keys).await.unwrap();
        assert_eq!(docs, vec![json!("B"), json!("A")]);
    }

    #[tokio::test]
    async fn remove_reports_whether_anything_was_deleted() {
        let store = MemoryDocumentStore::new();
        store.upsert("a", &json!({})).await.unwrap();
        assert!(store.remove("a").await.unwrap());
        assert!(!store.remove("a").await.unwrap());
        assert!(store.is_empty().await);
    }
}
