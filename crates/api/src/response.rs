//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "success": true, "data": T }` envelope returned by user and company
/// creation.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
