//! Account route handlers.
//!
//! Login is where basket reconciliation happens: the anonymous basket carried
//! by the `buyerId` cookie is resolved against the user's saved basket, and
//! the cookie is cleared once consumed.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use driftwood_core::BuyerToken;

use crate::db::baskets::BasketRepository;
use crate::error::Result;
use crate::middleware::auth::CurrentUser;
use crate::middleware::buyer::{BUYER_COOKIE, clear_buyer_cookie, cookie_value};
use crate::models::user::UserDto;
use crate::services::auth::AuthService;
use crate::services::basket;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login and reconcile baskets.
#[instrument(skip(state, headers, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Response> {
    let auth = AuthService::new(state.pool());
    let (user, token) = auth.login(&payload.username, &payload.password).await?;

    let anon_token = cookie_value(&headers, BUYER_COOKIE).map(BuyerToken::from);
    let outcome = basket::reconcile(state.pool(), &user.username, anon_token.as_ref()).await?;

    let dto = UserDto {
        email: user.email,
        token,
        basket: outcome.basket.as_ref().map(|b| b.to_dto()),
    };

    if outcome.consumed_anonymous {
        let clear = clear_buyer_cookie(state.config().is_secure());
        Ok((AppendHeaders([(header::SET_COOKIE, clear)]), Json(dto)).into_response())
    } else {
        Ok(Json(dto).into_response())
    }
}

/// Register a new account.
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<StatusCode> {
    AuthService::new(state.pool())
        .register(&payload.username, &payload.email, &payload.password)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Current user with a fresh token and their basket.
#[instrument(skip(state, user), fields(username = %user.0.username))]
pub async fn current_user(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<UserDto>> {
    let CurrentUser(user) = user;

    let token = AuthService::new(state.pool()).issue_token(&user).await?;
    let user_basket = BasketRepository::new(state.pool())
        .get_by_token(&BuyerToken::user(&user.username))
        .await?;

    Ok(Json(UserDto {
        email: user.email,
        token,
        basket: user_basket.map(|b| b.to_dto()),
    }))
}
