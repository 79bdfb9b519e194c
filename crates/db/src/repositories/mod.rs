//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&dyn DocumentStore` as the first argument.

pub mod company_repo;
pub mod document_repo;
pub mod expand;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use company_repo::CompanyRepo;
pub use document_repo::DocumentRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;

use taskboard_core::kind::KEY_FIELD;

use crate::error::{RepoResult, StoreError};
use crate::models::{decode, encode, has_kind, Document};
use crate::store::{DocumentStore, Filter};

/// Fetch a document of type `T`. A key holding a different kind reads as absent.
pub(crate) async fn fetch<T: Document>(
    store: &dyn DocumentStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(value) if has_kind(&value, T::KIND) => decode(key, value).map(Some),
        _ => Ok(None),
    }
}

/// Fetch a referenced document, failing with "<entity> does not exist".
pub(crate) async fn fetch_required<T: Document>(
    store: &dyn DocumentStore,
    key: &str,
) -> RepoResult<T> {
    match fetch::<T>(store, key).await? {
        Some(doc) => Ok(doc),
        None => Err(T::KIND.missing().into()),
    }
}

/// Decode every document of kind `T` in `values`, skipping other kinds.
pub(crate) fn decode_all<T: Document>(values: Vec<serde_json::Value>) -> Result<Vec<T>, StoreError> {
    values
        .into_iter()
        .filter(|v| has_kind(v, T::KIND))
        .map(|v| {
            let key = v
                .get(KEY_FIELD)
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            decode(&key, v)
        })
        .collect()
}

/// Scan for documents of kind `T` matching `filter`.
pub(crate) async fn find_all<T: Document>(
    store: &dyn DocumentStore,
    filter: Filter,
) -> Result<Vec<T>, StoreError> {
    let filter = match filter {
        Filter::All => Filter::KindIs(T::KIND),
        other => Filter::And(vec![Filter::KindIs(T::KIND), other]),
    };
    decode_all(store.find(&filter).await?)
}

/// Create-or-replace a document under its own key.
pub(crate) async fn save<T: Document>(store: &dyn DocumentStore, doc: &T) -> Result<(), StoreError> {
    store.upsert(doc.key(), &encode(doc)?).await
}
