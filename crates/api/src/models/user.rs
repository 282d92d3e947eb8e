//! Account models and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use driftwood_core::UserId;

use super::basket::BasketDto;

/// An authenticated account.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Response shape for login and currentUser: the account plus its bearer
/// token and whatever basket survived resolution (absent means empty).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub email: String,
    pub token: String,
    pub basket: Option<BasketDto>,
}
