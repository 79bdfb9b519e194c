//! Application-level reference expansion.
//!
//! Projects and tasks store user keys. Read paths that present them with full
//! user documents collect every referenced key, resolve them with one
//! `get_many`, and assemble the views from the resulting map. Keys that no
//! longer resolve are dropped from lists and become `None` in single slots.

use std::collections::HashMap;

use indexmap::IndexSet;
use taskboard_core::types::DocKey;

use super::decode_all;
use crate::error::StoreError;
use crate::models::project::Project;
use crate::models::task::{HistoryEntry, Task};
use crate::models::user::User;
use crate::models::views::{HistoryView, ProjectDetail, TaskDetail};
use crate::store::DocumentStore;

/// Resolve a set of user keys to user documents.
pub async fn load_users<'a>(
    store: &dyn DocumentStore,
    keys: impl IntoIterator<Item = &'a DocKey>,
) -> Result<HashMap<DocKey, User>, StoreError> {
    let unique: IndexSet<DocKey> = keys.into_iter().cloned().collect();
    let keys: Vec<DocKey> = unique.into_iter().collect();
    if keys.is_empty() {
        return Ok(HashMap::new());
    }
    let users = decode_all::<User>(store.get_many(&keys).await?)?;
    Ok(users.into_iter().map(|u| (u.id.clone(), u)).collect())
}

fn pick_all<'a>(
    users: &HashMap<DocKey, User>,
    keys: impl IntoIterator<Item = &'a DocKey>,
) -> Vec<User> {
    keys.into_iter().filter_map(|k| users.get(k).cloned()).collect()
}

fn history_view(entry: HistoryEntry, users: &HashMap<DocKey, User>) -> HistoryView {
    HistoryView {
        user: users.get(&entry.user).cloned(),
        log: entry.log,
        created_at: entry.created_at,
    }
}

/// User keys a task refers to: owner, members, assignee, history authors.
fn task_user_keys(task: &Task) -> impl Iterator<Item = &DocKey> {
    std::iter::once(&task.owner)
        .chain(task.users.iter())
        .chain(task.assigned_to.iter())
        .chain(task.history.iter().map(|h| &h.user))
}

fn task_detail(task: Task, users: &HashMap<DocKey, User>) -> TaskDetail {
    TaskDetail {
        owner: users.get(&task.owner).cloned(),
        users: pick_all(users, &task.users),
        assigned_to: task.assigned_to.as_ref().and_then(|k| users.get(k).cloned()),
        history: task
            .history
            .into_iter()
            .map(|h| history_view(h, users))
            .collect(),
        id: task.id,
        name: task.name,
        description: task.description,
        created_on: task.created_on,
    }
}

/// Expand a batch of tasks with a single user lookup.
pub async fn task_details(
    store: &dyn DocumentStore,
    tasks: Vec<Task>,
) -> Result<Vec<TaskDetail>, StoreError> {
    let users = load_users(store, tasks.iter().flat_map(task_user_keys)).await?;
    Ok(tasks.into_iter().map(|t| task_detail(t, &users)).collect())
}

/// Expand a project: owner and members to users, task keys to tasks.
pub async fn project_detail(
    store: &dyn DocumentStore,
    project: Project,
) -> Result<ProjectDetail, StoreError> {
    let users = load_users(
        store,
        std::iter::once(&project.owner).chain(project.users.iter()),
    )
    .await?;
    let tasks = decode_all::<Task>(store.get_many(&project.tasks).await?)?;

    Ok(ProjectDetail {
        owner: users.get(&project.owner).cloned(),
        users: pick_all(&users, &project.users),
        tasks,
        id: project.id,
        name: project.name,
        description: project.description,
        created_on: project.created_on,
    })
}
