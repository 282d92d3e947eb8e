//! Error-probe endpoints.
//!
//! Each probe returns one branch of the error taxonomy so clients can
//! exercise their handling end-to-end without manufacturing real failures.

use crate::error::{AppError, ValidationErrors};

/// 404 with a problem body.
pub async fn not_found() -> AppError {
    AppError::NotFound("probe".to_owned())
}

/// 400 with a problem title.
pub async fn bad_request() -> AppError {
    AppError::Problem("This is a bad request".to_owned())
}

/// 401.
pub async fn unauthorised() -> AppError {
    AppError::Unauthorized("probe".to_owned())
}

/// 400 with a field-level error list.
pub async fn validation_error() -> AppError {
    let mut errors = ValidationErrors::new();
    errors.push("problem1", "This is the first error");
    errors.push("problem2", "This is the second error");
    AppError::Validation(errors)
}

/// 500 with a generic body.
pub async fn server_error() -> AppError {
    AppError::Internal("probe".to_owned())
}
