//! Handlers for the `/company` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::validation::take;
use taskboard_db::models::company::{Company, CreateCompany};
use taskboard_db::repositories::CompanyRepo;

use crate::error::AppResult;
use crate::extractors::{extract_validated_json, Validate};
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /company/create`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl Validate for CreateCompanyRequest {
    type Output = CreateCompany;

    fn validate(self) -> Result<CreateCompany, CoreError> {
        let name = take("name", self.name)?;
        let website = take("website", self.website)?;
        Ok(CreateCompany {
            name,
            website,
            address: self.address,
            phone: self.phone,
        })
    }
}

/// GET /api/company/get/{companyId}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> AppResult<Json<Vec<Company>>> {
    let company = CompanyRepo::find_by_id(state.store(), &company_id).await?;
    Ok(Json(company.into_iter().collect()))
}

/// GET /api/company/getAll
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepo::list(state.store()).await?;
    Ok(Json(companies))
}

/// POST /api/company/create
///
/// Keyed by website; a second company with the same website is a 409.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateCompanyRequest>, JsonRejection>,
) -> AppResult<Json<SuccessResponse<Company>>> {
    let input = extract_validated_json(body)?;
    let company = CompanyRepo::create(state.store(), input).await?;
    Ok(Json(SuccessResponse::new(company)))
}
