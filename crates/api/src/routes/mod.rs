pub mod company;
pub mod health;
pub mod project;
pub mod task;
pub mod user;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::document;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /user/get/{userId}                     single user (0-1 element array)
/// /user/getAll                           every user
/// /user/login/{username}/{password}      password check
/// /user/create                           create (POST)
///
/// /company/get/{companyId}               single company
/// /company/getAll                        every company
/// /company/create                        create (POST)
///
/// /project/get/{projectId}               expanded project
/// /project/getAll                        every project
/// /project/getAll/{ownerId}              projects by owner
/// /project/getOther                      every project
/// /project/getOther/{userId}             projects by member
/// /project/getUsers/{projectId}          expanded member list
/// /project/create                        create (POST)
/// /project/addUser                       add member (POST)
///
/// /task/get/{taskId}                     expanded task with its project id
/// /task/getAssignedTo                    every task, expanded
/// /task/getAssignedTo/{userId}           tasks assigned to a user
/// /task/create/{projectId}               create and link (POST)
/// /task/addUser                          add member (POST)
/// /task/assignUser                       set assignee (POST)
/// /task/addHistory                       append history (POST)
///
/// /getAll                                every stored document
/// /get?document_id=                      single raw document
/// /delete                                delete by key (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/user", user::router())
        .nest("/company", company::router())
        .nest("/project", project::router())
        .nest("/task", task::router())
        .route("/getAll", get(document::list_all))
        .route("/get", get(document::get))
        .route("/delete", post(document::delete))
}
