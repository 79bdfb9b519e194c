//! Read-side views with user references expanded to full documents.

use serde::Serialize;
use taskboard_core::types::{DocKey, Timestamp};

use super::task::Task;
use super::user::User;

/// A project with owner, members and tasks resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(rename = "_id")]
    pub id: DocKey,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "createdON")]
    pub created_on: Timestamp,
    /// `None` when the owner key no longer resolves.
    pub owner: Option<User>,
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
}

/// A task with owner, members, assignee and history authors resolved.
#[derive(Debug, Clone, Serialize)]
pub struct TaskDetail {
    #[serde(rename = "_id")]
    pub id: DocKey,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "createdON")]
    pub created_on: Timestamp,
    pub owner: Option<User>,
    pub users: Vec<User>,
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<User>,
    pub history: Vec<HistoryView>,
}

/// A history entry with its author resolved.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub log: String,
    pub user: Option<User>,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

/// Result row of a task lookup: the task plus the project that lists it.
#[derive(Debug, Clone, Serialize)]
pub struct TaskLookup {
    /// `None` if no project links the task.
    #[serde(rename = "projectId")]
    pub project_id: Option<DocKey>,
    pub task: TaskDetail,
}
