//! Route definitions for the `/task` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/task`.
///
/// ```text
/// GET    /get/{task_id}              -> get_by_id
/// GET    /getAssignedTo              -> list
/// GET    /getAssignedTo/{user_id}    -> list_assigned_to
/// POST   /create/{project_id}        -> create
/// POST   /addUser                    -> add_user
/// POST   /assignUser                 -> assign_user
/// POST   /addHistory                 -> add_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get/{task_id}", get(task::get_by_id))
        .route("/getAssignedTo", get(task::list))
        .route("/getAssignedTo/{user_id}", get(task::list_assigned_to))
        .route("/create/{project_id}", post(task::create))
        .route("/addUser", post(task::add_user))
        .route("/assignUser", post(task::assign_user))
        .route("/addHistory", post(task::add_history))
}
