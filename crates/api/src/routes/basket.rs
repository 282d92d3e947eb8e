//! Basket route handlers.
//!
//! Item quantities ride in the query string (`?productId=5&quantity=2`),
//! matching the client agent. The first anonymous add creates a basket and
//! hands the fresh buyer token back in the `buyerId` cookie.

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use driftwood_core::{BuyerToken, ProductId};

use crate::db::baskets::BasketRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::buyer::{BuyerId, set_buyer_cookie};
use crate::models::basket::{Basket, BasketDto};
use crate::state::AppState;

/// Item mutation parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuery {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Get the caller's basket.
#[instrument(skip(state, buyer))]
pub async fn show(State(state): State<AppState>, buyer: BuyerId) -> Result<Json<BasketDto>> {
    let basket = resolve_basket(&state, buyer.0.as_ref()).await?;
    basket
        .map(|b| Json(b.to_dto()))
        .ok_or_else(|| AppError::NotFound("basket".to_owned()))
}

/// Add an item, creating the basket (and buyer cookie) on first use.
#[instrument(skip(state, buyer), fields(product_id = %query.product_id, quantity = query.quantity))]
pub async fn add(
    State(state): State<AppState>,
    buyer: BuyerId,
    Query(query): Query<ItemQuery>,
) -> Result<Response> {
    if query.quantity <= 0 {
        return Err(AppError::Problem(
            "Quantity must be greater than zero".to_owned(),
        ));
    }

    let repo = BasketRepository::new(state.pool());

    // Reuse the existing basket when one resolves; otherwise mint a new one,
    // keyed by a fresh anonymous token when the caller has no identity yet.
    let (mut basket, fresh_token) = match resolve_basket(&state, buyer.0.as_ref()).await? {
        Some(basket) => (basket, None),
        None => {
            let (token, fresh) = match buyer.0 {
                Some(token) => (token, false),
                None => (BuyerToken::anonymous(), true),
            };
            let basket = repo.create(&token).await?;
            (basket, fresh.then_some(token))
        }
    };

    let product = ProductRepository::new(state.pool())
        .get(query.product_id)
        .await?
        .ok_or_else(|| AppError::Problem("Product not found".to_owned()))?;

    basket.add_item(&product, query.quantity);
    repo.save_items(&basket).await.map_err(|e| {
        tracing::error!(error = %e, "failed to persist basket item");
        AppError::Problem("Problem saving item to basket".to_owned())
    })?;

    let body = Json(basket.to_dto());
    match fresh_token {
        Some(token) => {
            let cookie = set_buyer_cookie(&token, state.config().is_secure());
            Ok((
                StatusCode::CREATED,
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                body,
            )
                .into_response())
        }
        None => Ok((StatusCode::CREATED, body).into_response()),
    }
}

/// Remove an item quantity from the caller's basket.
#[instrument(skip(state, buyer), fields(product_id = %query.product_id, quantity = query.quantity))]
pub async fn remove(
    State(state): State<AppState>,
    buyer: BuyerId,
    Query(query): Query<ItemQuery>,
) -> Result<StatusCode> {
    if query.quantity <= 0 {
        return Err(AppError::Problem(
            "Quantity must be greater than zero".to_owned(),
        ));
    }

    let mut basket = resolve_basket(&state, buyer.0.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("basket".to_owned()))?;

    if !basket.remove_item(query.product_id, query.quantity) {
        return Err(AppError::Problem(
            "Problem removing item from the basket".to_owned(),
        ));
    }

    let repo = BasketRepository::new(state.pool());
    repo.save_items(&basket).await.map_err(|e| {
        tracing::error!(error = %e, "failed to persist basket removal");
        AppError::Problem("Problem removing item from the basket".to_owned())
    })?;

    Ok(StatusCode::OK)
}

/// Fetch the basket for the resolved buyer token, if both exist.
async fn resolve_basket(
    state: &AppState,
    token: Option<&BuyerToken>,
) -> Result<Option<Basket>> {
    let Some(token) = token else {
        return Ok(None);
    };
    Ok(BasketRepository::new(state.pool())
        .get_by_token(token)
        .await?)
}
