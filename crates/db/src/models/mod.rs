//! Typed documents and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` + `Deserialize` document struct matching the stored JSON
//! - A create DTO carrying already-validated input

pub mod company;
pub mod project;
pub mod task;
pub mod user;
pub mod views;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use taskboard_core::kind::{DocKind, KIND_FIELD};

use crate::error::StoreError;

/// A record kind persisted in the document store.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// The `_type` tag this model is stored under.
    const KIND: DocKind;

    /// The document key.
    fn key(&self) -> &str;
}

/// Whether a raw document carries the given `_type` tag.
pub fn has_kind(doc: &Value, kind: DocKind) -> bool {
    doc.get(KIND_FIELD).and_then(Value::as_str) == Some(kind.as_str())
}

/// Serialize a model into its stored JSON form.
pub fn encode<T: Serialize>(doc: &T) -> Result<Value, StoreError> {
    Ok(serde_json::to_value(doc)?)
}

/// Decode a stored document, reporting failures against `key`.
pub fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
