//! Task document model and DTOs.

use serde::{Deserialize, Serialize};
use taskboard_core::kind::DocKind;
use taskboard_core::members::MemberSet;
use taskboard_core::types::{DocKey, Timestamp};

use super::Document;

/// A stored task, keyed by a generated identifier.
///
/// The owning project is not recorded here; `Project::tasks` holds the link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: DocKey,
    #[serde(rename = "_type")]
    pub kind: DocKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner: DocKey,
    #[serde(default)]
    pub users: MemberSet,
    #[serde(
        rename = "assignedTo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to: Option<DocKey>,
    /// Append-only activity log.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(rename = "createdON")]
    pub created_on: Timestamp,
}

impl Document for Task {
    const KIND: DocKind = DocKind::Task;

    fn key(&self) -> &str {
        &self.id
    }
}

/// One entry of a task's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub log: String,
    /// Key of the user who wrote the entry.
    pub user: DocKey,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub name: String,
    pub description: Option<String>,
    pub owner: DocKey,
    pub users: Vec<DocKey>,
}
