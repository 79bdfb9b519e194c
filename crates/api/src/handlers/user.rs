//! Handlers for the `/user` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use taskboard_core::error::CoreError;
use taskboard_core::validation::take;
use taskboard_db::models::user::{CreateUser, User};
use taskboard_db::repositories::UserRepo;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extractors::{extract_validated_json, Validate};
use crate::response::SuccessResponse;
use crate::state::AppState;

const UNKNOWN_USERNAME: &str = "username provided does not exist or was not correct";
const WRONG_PASSWORD: &str = "password provided is not correct";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /user/create`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A [`CreateUserRequest`] with its required fields checked. The password is
/// still plaintext here.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub address: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Validate for CreateUserRequest {
    type Output = NewUser;

    fn validate(self) -> Result<NewUser, CoreError> {
        let username = take("username", self.username)?;
        let password = take("password", self.password)?;
        Ok(NewUser {
            username,
            password,
            name: self.name,
            address: self.address,
            company: self.company,
            email: self.email,
            phone: self.phone,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/user/get/{userId}
///
/// Zero or one user; an unknown id is an empty array, not an error.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<User>>> {
    let user = UserRepo::find_by_id(state.store(), &user_id).await?;
    Ok(Json(user.into_iter().collect()))
}

/// GET /api/user/getAll
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list(state.store()).await?;
    Ok(Json(users))
}

/// GET /api/user/login/{username}/{password}
///
/// Returns the stored user document when the password matches its hash.
pub async fn login(
    State(state): State<AppState>,
    Path((username, password)): Path<(String, String)>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(state.store(), &username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(UNKNOWN_USERNAME.into())))?;

    let password_valid = verify_password(&password, &user.password)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(username = %user.username, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(WRONG_PASSWORD.into())));
    }

    Ok(Json(user))
}

/// POST /api/user/create
///
/// Hashes the password and inserts the user keyed by its username. A taken
/// username is a 409.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<Json<SuccessResponse<User>>> {
    let input = extract_validated_json(body)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash,
        name: input.name,
        address: input.address,
        company: input.company,
        email: input.email,
        phone: input.phone,
    };

    let user = UserRepo::create(state.store(), create_dto).await?;
    Ok(Json(SuccessResponse::new(user)))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn username_is_checked_before_password() {
        let err = CreateUserRequest::default().validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "username must exist");
    }

    #[test]
    fn blank_password_is_missing() {
        let req = CreateUserRequest {
            username: Some("alice".into()),
            password: Some("  ".into()),
            ..Default::default()
        };
        let err = req.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "password must exist");
    }

    #[test]
    fn optional_fields_pass_through() {
        let req = CreateUserRequest {
            username: Some("alice".into()),
            password: Some("secret".into()),
            email: Some("alice@example.com".into()),
            ..Default::default()
        };
        let user = req.validate().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        assert!(user.phone.is_none());
    }
}
