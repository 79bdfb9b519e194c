//! Route definitions for the `/project` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/project`.
///
/// ```text
/// GET    /get/{project_id}       -> get_by_id
/// GET    /getAll                 -> list
/// GET    /getAll/{owner_id}      -> list_by_owner
/// GET    /getOther               -> list
/// GET    /getOther/{user_id}     -> list_by_member
/// GET    /getUsers/{project_id}  -> list_users
/// POST   /create                 -> create
/// POST   /addUser                -> add_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get/{project_id}", get(project::get_by_id))
        .route("/getAll", get(project::list))
        .route("/getAll/{owner_id}", get(project::list_by_owner))
        .route("/getOther", get(project::list))
        .route("/getOther/{user_id}", get(project::list_by_member))
        .route("/getUsers/{project_id}", get(project::list_users))
        .route("/create", post(project::create))
        .route("/addUser", post(project::add_user))
}
