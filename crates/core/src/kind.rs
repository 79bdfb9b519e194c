//! The `_type` tag every stored document carries.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const KIND_USER: &str = "User";
pub const KIND_COMPANY: &str = "Company";
pub const KIND_PROJECT: &str = "Project";
pub const KIND_TASK: &str = "Task";

/// Name of the JSON field holding the document kind.
pub const KIND_FIELD: &str = "_type";

/// Name of the JSON field holding the document key.
pub const KEY_FIELD: &str = "_id";

/// The four record kinds held in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocKind {
    User,
    Company,
    Project,
    Task,
}

impl DocKind {
    /// Return the `_type` string stored on the document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => KIND_USER,
            Self::Company => KIND_COMPANY,
            Self::Project => KIND_PROJECT,
            Self::Task => KIND_TASK,
        }
    }

    /// Lower-case entity name used in client-facing messages.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Company => "company",
            Self::Project => "project",
            Self::Task => "task",
        }
    }

    /// Error for a referenced document of this kind that is absent.
    pub fn missing(&self) -> CoreError {
        CoreError::MissingReference {
            entity: self.entity_name(),
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
