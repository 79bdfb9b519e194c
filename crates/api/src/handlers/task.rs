//! Handlers for the `/task` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::validation::take;
use taskboard_db::models::task::CreateTask;
use taskboard_db::models::user::User;
use taskboard_db::models::views::{HistoryView, TaskDetail, TaskLookup};
use taskboard_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /task/create/{projectId}`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub users: Option<Vec<String>>,
}

impl Validate for CreateTaskRequest {
    type Output = CreateTask;

    fn validate(self) -> Result<CreateTask, CoreError> {
        let name = take("name", self.name)?;
        let owner = take("owner", self.owner)?;
        Ok(CreateTask {
            name,
            description: self.description,
            owner,
            users: self.users.unwrap_or_default(),
        })
    }
}

/// Request body for `POST /task/addUser` and `POST /task/assignUser`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUserRequest {
    pub task_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug)]
pub struct TaskUser {
    pub task_id: String,
    pub user_id: String,
}

impl Validate for TaskUserRequest {
    type Output = TaskUser;

    fn validate(self) -> Result<TaskUser, CoreError> {
        let task_id = take("taskId", self.task_id)?;
        let user_id = take("userId", self.user_id)?;
        Ok(TaskUser { task_id, user_id })
    }
}

/// Request body for `POST /task/addHistory`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddHistoryRequest {
    pub task_id: Option<String>,
    pub user_id: Option<String>,
    pub log: Option<String>,
}

#[derive(Debug)]
pub struct NewHistoryEntry {
    pub task_id: String,
    pub user_id: String,
    pub log: String,
}

impl Validate for AddHistoryRequest {
    type Output = NewHistoryEntry;

    fn validate(self) -> Result<NewHistoryEntry, CoreError> {
        let task_id = take("taskId", self.task_id)?;
        let user_id = take("userId", self.user_id)?;
        let log = take("log", self.log)?;
        Ok(NewHistoryEntry {
            task_id,
            user_id,
            log,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/task/get/{taskId}
///
/// `[{ projectId, task }]` with the task's references expanded; `[]` for an
/// unknown id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> AppResult<Json<Vec<TaskLookup>>> {
    let rows = TaskRepo::find_lookup(state.store(), &task_id).await?;
    Ok(Json(rows))
}

/// GET /api/task/getAssignedTo/{userId}
pub async fn list_assigned_to(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = TaskRepo::list_assigned_to(state.store(), &user_id).await?;
    Ok(Json(tasks))
}

/// GET /api/task/getAssignedTo
///
/// Every task, expanded.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TaskDetail>>> {
    let tasks = TaskRepo::list_expanded(state.store()).await?;
    Ok(Json(tasks))
}

/// POST /api/task/create/{projectId}
///
/// Creates the task, links it into the project and returns it expanded.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> AppResult<Json<TaskDetail>> {
    let input = extract_validated_json(body)?;
    let task = TaskRepo::create(state.store(), &project_id, input).await?;
    Ok(Json(task))
}

/// POST /api/task/addUser
pub async fn add_user(
    State(state): State<AppState>,
    body: Result<Json<TaskUserRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let input = extract_validated_json(body)?;
    let user = TaskRepo::add_user(state.store(), &input.task_id, &input.user_id).await?;
    Ok(Json(user))
}

/// POST /api/task/assignUser
pub async fn assign_user(
    State(state): State<AppState>,
    body: Result<Json<TaskUserRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let input = extract_validated_json(body)?;
    let user = TaskRepo::assign_user(state.store(), &input.task_id, &input.user_id).await?;
    Ok(Json(user))
}

/// POST /api/task/addHistory
///
/// Returns the new entry with its author resolved.
pub async fn add_history(
    State(state): State<AppState>,
    body: Result<Json<AddHistoryRequest>, JsonRejection>,
) -> AppResult<Json<HistoryView>> {
    let input = extract_validated_json(body)?;
    let entry =
        TaskRepo::add_history(state.store(), &input.task_id, &input.user_id, &input.log).await?;
    Ok(Json(entry))
}
