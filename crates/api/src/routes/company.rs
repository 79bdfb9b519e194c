//! Route definitions for the `/company` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::company;
use crate::state::AppState;

/// Routes mounted at `/company`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get/{company_id}", get(company::get_by_id))
        .route("/getAll", get(company::list))
        .route("/create", post(company::create))
}
