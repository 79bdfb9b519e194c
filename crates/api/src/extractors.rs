//! JSON body extraction with required-field validation.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use taskboard_core::error::CoreError;

use crate::error::AppError;

/// A request payload whose required fields are checked before any store
/// access. `validate` consumes the raw body and yields the checked input.
pub trait Validate: Sized {
    type Output;

    fn validate(self) -> Result<Self::Output, CoreError>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
///
/// Handlers use it as:
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> AppResult<...> {
///     let input = extract_validated_json(body)?;
/// }
/// ```
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T::Output, AppError> {
    let value = extract_json(result)?;
    Ok(value.validate()?)
}
