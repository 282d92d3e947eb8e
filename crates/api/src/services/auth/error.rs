//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::error::ValidationErrors;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration input failed field-level validation.
    #[error("validation failed")]
    Validation(ValidationErrors),

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failure.
    #[error("password hashing error: {0}")]
    Hash(String),
}
