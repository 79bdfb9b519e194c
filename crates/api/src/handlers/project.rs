//! Handlers for the `/project` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::validation::take;
use taskboard_db::models::project::{CreateProject, Project};
use taskboard_db::models::user::User;
use taskboard_db::models::views::ProjectDetail;
use taskboard_db::repositories::ProjectRepo;

use crate::error::AppResult;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /project/create`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub users: Option<Vec<String>>,
}

impl Validate for CreateProjectRequest {
    type Output = CreateProject;

    fn validate(self) -> Result<CreateProject, CoreError> {
        let name = take("name", self.name)?;
        let owner = take("owner", self.owner)?;
        Ok(CreateProject {
            name,
            description: self.description,
            owner,
            users: self.users.unwrap_or_default(),
        })
    }
}

/// Request body for `POST /project/addUser`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUserRequest {
    pub project_id: Option<String>,
    pub user_id: Option<String>,
}

/// Checked `(project_id, user_id)` pair.
#[derive(Debug)]
pub struct ProjectUser {
    pub project_id: String,
    pub user_id: String,
}

impl Validate for ProjectUserRequest {
    type Output = ProjectUser;

    fn validate(self) -> Result<ProjectUser, CoreError> {
        let project_id = take("projectId", self.project_id)?;
        let user_id = take("userId", self.user_id)?;
        Ok(ProjectUser {
            project_id,
            user_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/project/get/{projectId}
///
/// The project with owner, members and tasks expanded, as a zero- or
/// one-element array.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<ProjectDetail>>> {
    let detail = ProjectRepo::find_detail(state.store(), &project_id).await?;
    Ok(Json(detail.into_iter().collect()))
}

/// GET /api/project/getAll
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(state.store()).await?;
    Ok(Json(projects))
}

/// GET /api/project/getAll/{ownerId}
pub async fn list_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_owner(state.store(), &owner_id).await?;
    Ok(Json(projects))
}

/// GET /api/project/getOther/{userId}
///
/// Projects listing the user as a member.
pub async fn list_by_member(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_by_member(state.store(), &user_id).await?;
    Ok(Json(projects))
}

/// GET /api/project/getUsers/{projectId}
pub async fn list_users(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> AppResult<Json<Vec<User>>> {
    let users = ProjectRepo::list_users(state.store(), &project_id).await?;
    Ok(Json(users))
}

/// POST /api/project/create
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> AppResult<Json<Project>> {
    let input = extract_validated_json(body)?;
    let project = ProjectRepo::create(state.store(), input).await?;
    Ok(Json(project))
}

/// POST /api/project/addUser
///
/// Returns the user document that was added.
pub async fn add_user(
    State(state): State<AppState>,
    body: Result<Json<ProjectUserRequest>, JsonRejection>,
) -> AppResult<Json<User>> {
    let input = extract_validated_json(body)?;
    let user = ProjectRepo::add_user(state.store(), &input.project_id, &input.user_id).await?;
    Ok(Json(user))
}
