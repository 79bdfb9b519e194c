//! Repository for `Project` documents.

use chrono::Utc;
use taskboard_core::kind::DocKind;
use taskboard_core::members::MemberSet;
use taskboard_core::types::new_doc_key;

use super::{expand, fetch, fetch_required, find_all, save};
use crate::error::{RepoResult, StoreError};
use crate::models::project::{CreateProject, Project};
use crate::models::user::User;
use crate::models::views::ProjectDetail;
use crate::store::{DocumentStore, Filter};

/// Provides CRUD and membership operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project under a freshly generated key.
    ///
    /// The owner is always added to `users`. The write is an upsert: the key
    /// is never caller-supplied, so there is nothing to conflict with.
    pub async fn create(
        store: &dyn DocumentStore,
        input: CreateProject,
    ) -> Result<Project, StoreError> {
        let mut users: MemberSet = input.users.into_iter().collect();
        users.insert(input.owner.clone());

        let project = Project {
            id: new_doc_key(),
            kind: DocKind::Project,
            name: input.name,
            description: input.description,
            owner: input.owner,
            users,
            tasks: Vec::new(),
            created_on: Utc::now(),
        };
        save(store, &project).await?;
        tracing::info!(project_id = %project.id, owner = %project.owner, "Project created");
        Ok(project)
    }

    /// Find a project by key, unexpanded.
    pub async fn find_by_id(
        store: &dyn DocumentStore,
        project_id: &str,
    ) -> Result<Option<Project>, StoreError> {
        fetch::<Project>(store, project_id).await
    }

    /// Find a project by key with owner, members and tasks expanded.
    pub async fn find_detail(
        store: &dyn DocumentStore,
        project_id: &str,
    ) -> Result<Option<ProjectDetail>, StoreError> {
        match fetch::<Project>(store, project_id).await? {
            Some(project) => expand::project_detail(store, project).await.map(Some),
            None => Ok(None),
        }
    }

    /// List every project in creation order.
    pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Project>, StoreError> {
        find_all::<Project>(store, Filter::All).await
    }

    /// List projects owned by `owner_id`.
    pub async fn list_by_owner(
        store: &dyn DocumentStore,
        owner_id: &str,
    ) -> Result<Vec<Project>, StoreError> {
        find_all::<Project>(store, Filter::field_equals("owner", owner_id)).await
    }

    /// List projects whose member set contains `user_id`.
    pub async fn list_by_member(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<Project>, StoreError> {
        find_all::<Project>(store, Filter::array_contains("users", user_id)).await
    }

    /// Resolve the members of a project. An unknown project has no members.
    pub async fn list_users(
        store: &dyn DocumentStore,
        project_id: &str,
    ) -> Result<Vec<User>, StoreError> {
        let Some(project) = fetch::<Project>(store, project_id).await? else {
            return Ok(Vec::new());
        };
        let users = expand::load_users(store, &project.users).await?;
        Ok(project
            .users
            .iter()
            .filter_map(|k| users.get(k).cloned())
            .collect())
    }

    /// Add a user to a project's member set.
    ///
    /// Both documents must exist. Adding an existing member is a no-op and
    /// performs no write. Returns the user document.
    pub async fn add_user(
        store: &dyn DocumentStore,
        project_id: &str,
        user_id: &str,
    ) -> RepoResult<User> {
        let user = fetch_required::<User>(store, user_id).await?;
        let mut project = fetch_required::<Project>(store, project_id).await?;

        if project.users.insert(user.id.clone()) {
            save(store, &project).await?;
            tracing::info!(project_id, user_id, "User added to project");
        } else {
            tracing::debug!(project_id, user_id, "User already a project member");
        }
        Ok(user)
    }
}
