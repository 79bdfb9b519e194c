//! Repository for `Task` documents.

use chrono::Utc;
use taskboard_core::error::CoreError;
use taskboard_core::kind::DocKind;
use taskboard_core::members::MemberSet;
use taskboard_core::types::new_doc_key;

use super::{expand, fetch, fetch_required, find_all, save};
use crate::error::{RepoResult, StoreError};
use crate::models::encode;
use crate::models::project::Project;
use crate::models::task::{CreateTask, HistoryEntry, Task};
use crate::models::user::User;
use crate::models::views::{HistoryView, TaskDetail, TaskLookup};
use crate::store::{DocumentStore, Filter};

/// Provides CRUD, membership, assignment and history operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Create a task and link it into its project.
    ///
    /// The project must exist before anything is written. The task is
    /// persisted first, then appended to `Project::tasks`. If the second write
    /// fails the task document is removed again so no unlinked task is left
    /// behind, and the original error is returned.
    pub async fn create(
        store: &dyn DocumentStore,
        project_id: &str,
        input: CreateTask,
    ) -> RepoResult<TaskDetail> {
        let mut project = fetch_required::<Project>(store, project_id).await?;

        let mut users: MemberSet = input.users.into_iter().collect();
        users.insert(input.owner.clone());

        let task = Task {
            id: new_doc_key(),
            kind: DocKind::Task,
            name: input.name,
            description: input.description,
            owner: input.owner,
            users,
            assigned_to: None,
            history: Vec::new(),
            created_on: Utc::now(),
        };
        let task_id = task.id.clone();

        project.tasks.push(task_id.clone());
        let project_doc = encode(&project)?;

        save(store, &task).await?;
        if let Err(e) = store.upsert(&project.id, &project_doc).await {
            tracing::warn!(
                task_id = %task_id,
                project_id,
                error = %e,
                "Linking task into project failed, removing task"
            );
            if let Err(cleanup) = store.remove(&task_id).await {
                tracing::error!(task_id = %task_id, error = %cleanup, "Task cleanup failed");
            }
            return Err(e.into());
        }
        tracing::info!(task_id = %task_id, project_id, "Task created");

        let stored = fetch::<Task>(store, &task_id).await?.ok_or_else(|| {
            CoreError::Internal(format!("task {task_id} missing immediately after write"))
        })?;
        let mut details = expand::task_details(store, vec![stored]).await?;
        details
            .pop()
            .ok_or_else(|| CoreError::Internal("task expansion returned nothing".into()).into())
    }

    /// Find a task by key, unexpanded.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        task_id: &str,
    ) -> Result<Option<Task>, StoreError> {
        fetch::<Task>(store, task_id).await
    }

    /// Look up a task with its references expanded, tagged with the project
    /// that lists it. Empty if the task does not exist.
    pub async fn find_lookup(
        store: &dyn DocumentStore,
        task_id: &str,
    ) -> Result<Vec<TaskLookup>, StoreError> {
        let Some(task) = fetch::<Task>(store, task_id).await? else {
            return Ok(Vec::new());
        };
        let project_id = find_all::<Project>(store, Filter::array_contains("tasks", task_id))
            .await?
            .into_iter()
            .next()
            .map(|p| p.id);

        Ok(expand::task_details(store, vec![task])
            .await?
            .into_iter()
            .map(|task| TaskLookup {
                project_id: project_id.clone(),
                task,
            })
            .collect())
    }

    /// Tasks assigned to `user_id`, expanded.
    pub async fn list_assigned_to(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<TaskDetail>, StoreError> {
        let tasks = find_all::<Task>(store, Filter::field_equals("assignedTo", user_id)).await?;
        expand::task_details(store, tasks).await
    }

    /// Every task, expanded.
    pub async fn list_expanded(store: &dyn DocumentStore) -> Result<Vec<TaskDetail>, StoreError> {
        let tasks = find_all::<Task>(store, Filter::All).await?;
        expand::task_details(store, tasks).await
    }

    /// Add a user to a task's member set. No write if already a member.
    pub async fn add_user(
        store: &dyn DocumentStore,
        task_id: &str,
        user_id: &str,
    ) -> RepoResult<User> {
        let user = fetch_required::<User>(store, user_id).await?;
        let mut task = fetch_required::<Task>(store, task_id).await?;

        if task.users.insert(user.id.clone()) {
            save(store, &task).await?;
            tracing::info!(task_id, user_id, "User added to task");
        }
        Ok(user)
    }

    /// Point `assignedTo` at a user. Membership of the task is not required.
    pub async fn assign_user(
        store: &dyn DocumentStore,
        task_id: &str,
        user_id: &str,
    ) -> RepoResult<User> {
        let user = fetch_required::<User>(store, user_id).await?;
        let mut task = fetch_required::<Task>(store, task_id).await?;

        task.assigned_to = Some(user.id.clone());
        save(store, &task).await?;
        tracing::info!(task_id, user_id, "Task assigned");
        Ok(user)
    }

    /// Append an entry to a task's history and return it with its author
    /// resolved.
    pub async fn add_history(
        store: &dyn DocumentStore,
        task_id: &str,
        user_id: &str,
        log: &str,
    ) -> RepoResult<HistoryView> {
        let mut task = fetch_required::<Task>(store, task_id).await?;
        let user = fetch_required::<User>(store, user_id).await?;

        let entry = HistoryEntry {
            log: log.to_string(),
            user: user.id.clone(),
            created_at: Utc::now(),
        };
        let view = HistoryView {
            log: entry.log.clone(),
            user: Some(user),
            created_at: entry.created_at,
        };
        task.history.push(entry);
        save(store, &task).await?;
        tracing::debug!(task_id, user_id, entries = task.history.len(), "History appended");

        Ok(view)
    }
}
