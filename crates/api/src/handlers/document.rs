//! Kind-agnostic document utilities mounted directly under `/api`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use taskboard_core::error::CoreError;
use taskboard_core::validation::take;
use taskboard_db::repositories::DocumentRepo;

use crate::error::{AppError, AppResult};
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// `document_id` carried either as a query parameter (`/get`) or a JSON body
/// (`/delete`).
#[derive(Debug, Default, Deserialize)]
pub struct DocumentIdRequest {
    pub document_id: Option<String>,
}

impl Validate for DocumentIdRequest {
    type Output = String;

    fn validate(self) -> Result<String, CoreError> {
        take("document_id", self.document_id)
    }
}

/// Response body for `POST /delete`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub document_id: String,
    pub deleted: bool,
}

/// GET /api/getAll
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let docs = DocumentRepo::list_all(state.store()).await?;
    Ok(Json(docs))
}

/// GET /api/get?document_id=
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<DocumentIdRequest>, QueryRejection>,
) -> AppResult<Json<Vec<Value>>> {
    let Query(params) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let document_id = params.validate()?;
    let docs = DocumentRepo::get(state.store(), &document_id).await?;
    Ok(Json(docs))
}

/// POST /api/delete
pub async fn delete(
    State(state): State<AppState>,
    body: Result<Json<DocumentIdRequest>, JsonRejection>,
) -> AppResult<Json<DeleteResponse>> {
    let document_id = extract_validated_json(body)?;
    let deleted = DocumentRepo::delete(state.store(), &document_id).await?;
    Ok(Json(DeleteResponse {
        document_id,
        deleted,
    }))
}
