//! Integration tests for the repository layer.
//!
//! Runs every data-access operation against `MemoryDocumentStore`:
//! - Natural-key uniqueness for users and companies
//! - Owner-in-members guarantee for projects and tasks
//! - Task creation linking, and task removal when linking fails
//! - Exact-value membership and short-circuiting not-found checks
//! - Reference expansion on read paths

use assert_matches::assert_matches;
use async_trait::async_trait;
use serde_json::Value;
use taskboard_core::error::CoreError;
use taskboard_core::kind::KIND_FIELD;
use taskboard_db::models::company::CreateCompany;
use taskboard_db::models::project::CreateProject;
use taskboard_db::models::task::CreateTask;
use taskboard_db::models::user::CreateUser;
use taskboard_db::repositories::{CompanyRepo, DocumentRepo, ProjectRepo, TaskRepo, UserRepo};
use taskboard_db::store::{DocumentStore, Filter, MemoryDocumentStore};
use taskboard_db::{RepoError, StoreError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        name: Some(format!("{username} name")),
        address: None,
        company: None,
        email: None,
        phone: None,
    }
}

fn new_project(owner: &str, users: &[&str]) -> CreateProject {
    CreateProject {
        name: "N".to_string(),
        description: Some("D".to_string()),
        owner: owner.to_string(),
        users: users.iter().map(|u| u.to_string()).collect(),
    }
}

fn new_task(owner: &str) -> CreateTask {
    CreateTask {
        name: "T".to_string(),
        description: Some("D".to_string()),
        owner: owner.to_string(),
        users: Vec::new(),
    }
}

async fn seed_users(store: &MemoryDocumentStore, names: &[&str]) {
    for name in names {
        UserRepo::create(store, new_user(name)).await.unwrap();
    }
}

fn assert_missing(err: RepoError, entity: &str) {
    assert_matches!(
        err,
        RepoError::Core(CoreError::MissingReference { entity: e }) if e == entity
    );
}

/// Memory store whose upserts of `Project` documents always fail.
struct ProjectWritesFail {
    inner: MemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for ProjectWritesFail {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key).await
    }

    async fn get_many(&self, keys: &[String]) -> Result<Vec<Value>, StoreError> {
        self.inner.get_many(keys).await
    }

    async fn insert(&self, key: &str, doc: &Value) -> Result<(), StoreError> {
        self.inner.insert(key, doc).await
    }

    async fn upsert(&self, key: &str, doc: &Value) -> Result<(), StoreError> {
        if doc[KIND_FIELD] == "Project" {
            return Err(StoreError::Corrupt {
                key: key.to_string(),
                reason: "project writes disabled".to_string(),
            });
        }
        self.inner.upsert(key, doc).await
    }

    async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.inner.remove(key).await
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Value>, StoreError> {
        self.inner.find(filter).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

// ---------------------------------------------------------------------------
// Users and companies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_create_twice_conflicts() {
    let store = MemoryDocumentStore::new();
    UserRepo::create(&store, new_user("alice")).await.unwrap();

    let err = UserRepo::create(&store, new_user("alice")).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
    assert_eq!(UserRepo::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn user_key_is_username() {
    let store = MemoryDocumentStore::new();
    let user = UserRepo::create(&store, new_user("alice")).await.unwrap();
    assert_eq!(user.id, "alice");

    let found = UserRepo::find_by_id(&store, "alice").await.unwrap().unwrap();
    assert_eq!(found, user);
    assert!(UserRepo::find_by_id(&store, "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn company_create_twice_conflicts_on_website() {
    let store = MemoryDocumentStore::new();
    let input = CreateCompany {
        name: "Acme".to_string(),
        website: "acme.example".to_string(),
        address: None,
        phone: None,
    };
    let company = CompanyRepo::create(&store, input.clone()).await.unwrap();
    assert_eq!(company.id, "acme.example");

    let err = CompanyRepo::create(&store, input).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
    assert_eq!(CompanyRepo::list(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn typed_lookup_ignores_other_kinds() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();

    assert!(UserRepo::find_by_id(&store, &project.id).await.unwrap().is_none());
    assert!(CompanyRepo::find_by_id(&store, "u1").await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn project_create_appends_owner_to_users() {
    let store = MemoryDocumentStore::new();
    let project = ProjectRepo::create(&store, new_project("u1", &["u2"])).await.unwrap();

    let users: Vec<&str> = project.users.iter().map(String::as_str).collect();
    assert_eq!(users, ["u2", "u1"]);
    assert!(!project.id.is_empty());

    let stored = ProjectRepo::find_by_id(&store, &project.id).await.unwrap().unwrap();
    assert_eq!(stored, project);
}

#[tokio::test]
async fn project_create_does_not_duplicate_listed_owner() {
    let store = MemoryDocumentStore::new();
    let project = ProjectRepo::create(&store, new_project("u1", &["u1", "u2"]))
        .await
        .unwrap();
    assert_eq!(project.users.len(), 2);
}

#[tokio::test]
async fn project_ids_are_fresh() {
    let store = MemoryDocumentStore::new();
    let a = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let b = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(ProjectRepo::list(&store).await.unwrap().len(), 2);
}

#[tokio::test]
async fn list_by_owner_and_member() {
    let store = MemoryDocumentStore::new();
    let p1 = ProjectRepo::create(&store, new_project("u1", &["bobby"])).await.unwrap();
    ProjectRepo::create(&store, new_project("u2", &["u1"])).await.unwrap();

    let owned = ProjectRepo::list_by_owner(&store, "u1").await.unwrap();
    assert_eq!(owned.iter().map(|p| &p.id).collect::<Vec<_>>(), [&p1.id]);

    let member = ProjectRepo::list_by_member(&store, "u1").await.unwrap();
    assert_eq!(member.len(), 2);

    let bob = ProjectRepo::list_by_member(&store, "bob").await.unwrap();
    assert!(bob.is_empty(), "substring of a member must not match");
}

#[tokio::test]
async fn project_add_user_twice_keeps_one_occurrence() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1", "bob"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &["bobby"])).await.unwrap();

    ProjectRepo::add_user(&store, &project.id, "bob").await.unwrap();
    let user = ProjectRepo::add_user(&store, &project.id, "bob").await.unwrap();
    assert_eq!(user.id, "bob");

    let stored = ProjectRepo::find_by_id(&store, &project.id).await.unwrap().unwrap();
    let occurrences = stored.users.iter().filter(|u| *u == "bob").count();
    assert_eq!(occurrences, 1);
    assert!(stored.users.contains("bobby"));
}

#[tokio::test]
async fn project_add_user_missing_user_writes_nothing() {
    let store = MemoryDocumentStore::new();
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();

    let err = ProjectRepo::add_user(&store, &project.id, "ghost").await.unwrap_err();
    assert_missing(err, "user");

    let stored = ProjectRepo::find_by_id(&store, &project.id).await.unwrap().unwrap();
    assert_eq!(stored, project);
}

#[tokio::test]
async fn project_add_user_missing_project_writes_nothing() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let before = store.len().await;

    let err = ProjectRepo::add_user(&store, "no-such-project", "u1").await.unwrap_err();
    assert_missing(err, "project");
    assert_eq!(store.len().await, before);
}

#[tokio::test]
async fn project_detail_expands_references() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1", "u2"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &["u2", "ghost"]))
        .await
        .unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();

    let detail = ProjectRepo::find_detail(&store, &project.id).await.unwrap().unwrap();
    assert_eq!(detail.owner.unwrap().id, "u1");
    let members: Vec<&str> = detail.users.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(members, ["u2", "u1"], "dangling keys are dropped");
    assert_eq!(detail.tasks.len(), 1);
    assert_eq!(detail.tasks[0].id, task.id);
}

#[tokio::test]
async fn list_users_of_unknown_project_is_empty() {
    let store = MemoryDocumentStore::new();
    assert!(ProjectRepo::list_users(&store, "nope").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn task_create_links_project_and_expands() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();

    let detail = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();
    assert_eq!(detail.owner.as_ref().unwrap().id, "u1");
    assert_eq!(detail.users.len(), 1);
    assert!(detail.assigned_to.is_none());

    let task = TaskRepo::find_by_id(&store, &detail.id).await.unwrap().unwrap();
    let members: Vec<&str> = task.users.iter().map(String::as_str).collect();
    assert_eq!(members, ["u1"]);

    let project = ProjectRepo::find_by_id(&store, &project.id).await.unwrap().unwrap();
    assert_eq!(project.tasks, vec![detail.id.clone()]);

    let lookup = TaskRepo::find_lookup(&store, &detail.id).await.unwrap();
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup[0].project_id.as_deref(), Some(project.id.as_str()));
    assert_eq!(lookup[0].task.owner.as_ref().unwrap().id, "u1");
}

#[tokio::test]
async fn task_create_for_missing_project_writes_nothing() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let before = store.len().await;

    let err = TaskRepo::create(&store, "no-such-project", new_task("u1")).await.unwrap_err();
    assert_missing(err, "project");
    assert_eq!(store.len().await, before);
}

#[tokio::test]
async fn task_create_removes_task_when_project_link_fails() {
    let inner = MemoryDocumentStore::new();
    let project = ProjectRepo::create(&inner, new_project("u1", &[])).await.unwrap();
    let store = ProjectWritesFail { inner };

    let err = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap_err();
    assert_matches!(err, RepoError::Store(StoreError::Corrupt { .. }));

    assert_eq!(store.inner.len().await, 1, "only the project remains");
    let stored = ProjectRepo::find_by_id(&store.inner, &project.id).await.unwrap().unwrap();
    assert!(stored.tasks.is_empty());
    assert!(TaskRepo::list_expanded(&store.inner).await.unwrap().is_empty());
}

#[tokio::test]
async fn task_lookup_of_unknown_task_is_empty() {
    let store = MemoryDocumentStore::new();
    assert!(TaskRepo::find_lookup(&store, "nope").await.unwrap().is_empty());
}

#[tokio::test]
async fn task_history_appends_in_order() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1", "u2"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();

    let first = TaskRepo::add_history(&store, &task.id, "u2", "L").await.unwrap();
    assert_eq!(first.log, "L");
    assert_eq!(first.user.as_ref().unwrap().id, "u2");

    TaskRepo::add_history(&store, &task.id, "u1", "second").await.unwrap();

    let stored = TaskRepo::find_by_id(&store, &task.id).await.unwrap().unwrap();
    let logs: Vec<&str> = stored.history.iter().map(|h| h.log.as_str()).collect();
    assert_eq!(logs, ["L", "second"]);
    assert_eq!(stored.history[0].user, "u2");
    assert!(stored.history[0].created_at <= stored.history[1].created_at);
}

#[tokio::test]
async fn task_history_returns_entry_as_stored() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();

    let view = TaskRepo::add_history(&store, &task.id, "u1", "started").await.unwrap();
    let author = view.user.unwrap();
    assert_eq!(author.id, "u1");
    assert_eq!(author.name.as_deref(), Some("u1 name"));

    let stored = TaskRepo::find_by_id(&store, &task.id).await.unwrap().unwrap();
    assert_eq!(stored.history.len(), 1);
    assert_eq!(stored.history[0].created_at, view.created_at);
    assert_eq!(stored.history[0].log, view.log);
}

#[tokio::test]
async fn task_history_on_missing_task_or_user_writes_nothing() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();

    let err = TaskRepo::add_history(&store, "nope", "u1", "L").await.unwrap_err();
    assert_missing(err, "task");

    let err = TaskRepo::add_history(&store, &task.id, "ghost", "L").await.unwrap_err();
    assert_missing(err, "user");

    let stored = TaskRepo::find_by_id(&store, &task.id).await.unwrap().unwrap();
    assert!(stored.history.is_empty());
}

#[tokio::test]
async fn task_add_user_is_exact_and_idempotent() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["bobby", "bob"]).await;
    let project = ProjectRepo::create(&store, new_project("bobby", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("bobby")).await.unwrap();

    TaskRepo::add_user(&store, &task.id, "bob").await.unwrap();
    TaskRepo::add_user(&store, &task.id, "bob").await.unwrap();

    let stored = TaskRepo::find_by_id(&store, &task.id).await.unwrap().unwrap();
    let members: Vec<&str> = stored.users.iter().map(String::as_str).collect();
    assert_eq!(members, ["bobby", "bob"]);
}

#[tokio::test]
async fn task_add_missing_user_leaves_members_untouched() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();
    let before = store.len().await;

    let err = TaskRepo::add_user(&store, &task.id, "ghost").await.unwrap_err();
    assert_missing(err, "user");

    let stored = TaskRepo::find_by_id(&store, &task.id).await.unwrap().unwrap();
    let members: Vec<&str> = stored.users.iter().map(String::as_str).collect();
    assert_eq!(members, ["u1"]);
    assert_eq!(store.len().await, before);
}

#[tokio::test]
async fn task_assign_user_sets_assignee() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1", "outsider"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();

    let user = TaskRepo::assign_user(&store, &task.id, "outsider").await.unwrap();
    assert_eq!(user.id, "outsider");

    let assigned = TaskRepo::list_assigned_to(&store, "outsider").await.unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].assigned_to.as_ref().unwrap().id, "outsider");
    assert!(TaskRepo::list_assigned_to(&store, "u1").await.unwrap().is_empty());

    let all = TaskRepo::list_expanded(&store).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn task_assign_missing_user_leaves_task_untouched() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let project = ProjectRepo::create(&store, new_project("u1", &[])).await.unwrap();
    let task = TaskRepo::create(&store, &project.id, new_task("u1")).await.unwrap();

    let err = TaskRepo::assign_user(&store, &task.id, "ghost").await.unwrap_err();
    assert_missing(err, "user");

    let stored = TaskRepo::find_by_id(&store, &task.id).await.unwrap().unwrap();
    assert!(stored.assigned_to.is_none());
}

#[tokio::test]
async fn task_assign_to_missing_task_writes_nothing() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;
    let before = store.len().await;

    let err = TaskRepo::assign_user(&store, "no-such-task", "u1").await.unwrap_err();
    assert_missing(err, "task");
    assert_eq!(store.len().await, before);
    assert!(TaskRepo::list_assigned_to(&store, "u1").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Generic documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn document_get_and_delete() {
    let store = MemoryDocumentStore::new();
    seed_users(&store, &["u1"]).await;

    assert_eq!(DocumentRepo::get(&store, "u1").await.unwrap().len(), 1);
    assert!(DocumentRepo::get(&store, "nope").await.unwrap().is_empty());
    assert_eq!(DocumentRepo::list_all(&store).await.unwrap().len(), 1);

    assert!(DocumentRepo::delete(&store, "u1").await.unwrap());
    assert!(!DocumentRepo::delete(&store, "u1").await.unwrap());
    assert!(store.get("u1").await.unwrap().is_none());
}
