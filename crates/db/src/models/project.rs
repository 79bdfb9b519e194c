//! Project document model and DTOs.

use serde::{Deserialize, Serialize};
use taskboard_core::kind::DocKind;
use taskboard_core::members::MemberSet;
use taskboard_core::types::{DocKey, Timestamp};

use super::Document;

/// A stored project, keyed by a generated identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: DocKey,
    #[serde(rename = "_type")]
    pub kind: DocKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User key of the owner.
    pub owner: DocKey,
    /// Member user keys. Contains `owner` at creation time.
    #[serde(default)]
    pub users: MemberSet,
    /// Keys of the tasks belonging to this project, in creation order.
    #[serde(default)]
    pub tasks: Vec<DocKey>,
    #[serde(rename = "createdON")]
    pub created_on: Timestamp,
}

impl Document for Project {
    const KIND: DocKind = DocKind::Project;

    fn key(&self) -> &str {
        &self.id
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub owner: DocKey,
    pub users: Vec<DocKey>,
}
