//! Route definitions for the `/user` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get/{user_id}", get(user::get_by_id))
        .route("/getAll", get(user::list))
        .route("/login/{username}/{password}", get(user::login))
        .route("/create", post(user::create))
}
