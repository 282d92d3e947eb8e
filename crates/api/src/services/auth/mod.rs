//! Authentication service.
//!
//! Thin credential layer: argon2 password hashing plus opaque bearer tokens
//! persisted in `user_tokens`. Authentication mechanics are deliberately
//! minimal - the basket and catalog core only need a username per request.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use rand::RngCore;
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::ValidationErrors;
use crate::models::user::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Bearer token lifetime in days.
const TOKEN_TTL_DAYS: i64 = 7;

/// Random bytes per bearer token.
const TOKEN_BYTES: usize = 32;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` with field-level errors when input is
    /// invalid or the username/email is already taken.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let mut errors = ValidationErrors::new();
        if username.trim().is_empty() {
            errors.push("username", "Username is required");
        }
        if email.trim().is_empty() || !email.contains('@') {
            errors.push("email", "A valid email address is required");
        }
        validate_password(password, &mut errors);
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let password_hash = hash_password(password)?;

        self.users
            .create(username.trim(), email.trim(), &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(field) => {
                    let mut errors = ValidationErrors::new();
                    match field.as_str() {
                        "email" => errors.push("email", "Email is already in use"),
                        _ => errors.push("username", "Username is taken"),
                    }
                    AuthError::Validation(errors)
                }
                other => AuthError::Repository(other),
            })
    }

    /// Login with username and password, issuing a fresh bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the username is unknown
    /// or the password does not verify.
    pub async fn login(&self, username: &str, password: &str) -> Result<(User, String), AuthError> {
        let (user, password_hash) = self
            .users
            .get_auth_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = generate_token();
        let expires_at = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
        self.users.insert_token(user.id, &token, expires_at).await?;

        Ok((user, token))
    }

    /// Issue a fresh bearer token for an already-authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the token cannot be stored.
    pub async fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
        self.users.insert_token(user.id, &token, expires_at).await?;
        Ok(token)
    }

    /// Resolve a bearer token to its user, if valid and unexpired.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.get_by_token(token).await?)
    }
}

/// Record password policy violations against the `password` field.
fn validate_password(password: &str, errors: &mut ValidationErrors) {
    if password.len() < MIN_PASSWORD_LENGTH {
        errors.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("password", "Password must contain a digit");
    }
}

/// Hash a password with argon2 and a random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Generate an opaque URL-safe bearer token.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("hunter2hunter2").expect("hash");
        assert!(verify_password("hunter2hunter2", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_validate_password_collects_all_violations() {
        let mut errors = ValidationErrors::new();
        validate_password("short", &mut errors);
        let messages = errors.field("password").expect("password errors");
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_validate_password_accepts_strong() {
        let mut errors = ValidationErrors::new();
        validate_password("longenough1", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_generate_token_is_unique_and_url_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
