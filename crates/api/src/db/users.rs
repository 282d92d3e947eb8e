//! User repository for account and token storage.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use driftwood_core::UserId;

use super::RepositoryError;
use crate::models::user::User;

#[derive(FromRow)]
struct UserAuthRow {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
}

impl UserAuthRow {
    fn into_parts(self) -> (User, String) {
        (
            User {
                id: self.id,
                username: self.username,
                email: self.email,
            },
            self.password_hash,
        )
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user and their password hash by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_auth_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserAuthRow>(
            "SELECT id, username, email, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(UserAuthRow::into_parts))
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` naming the violated field
    /// (`username` or `email`) when a unique index is hit,
    /// `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let id: UserId = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                let field = match db_err.constraint() {
                    Some(name) if name.contains("email") => "email",
                    _ => "username",
                };
                return RepositoryError::Conflict(field.to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(User {
            id,
            username: username.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Store an issued bearer token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert_token(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO user_tokens (token, user_id, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Resolve an unexpired bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email FROM users u \
             JOIN user_tokens t ON t.user_id = u.id \
             WHERE t.token = $1 AND t.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;
        Ok(user)
    }
}
