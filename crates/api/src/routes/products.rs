//! Catalog route handlers.
//!
//! The listing endpoint returns the page's items as the body and the
//! pagination metadata out-of-band in the `Pagination` response header,
//! which CORS exposes to the browser client.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::instrument;

use driftwood_core::{PAGINATION_HEADER, ProductId, ProductParams};

use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::product::{Product, ProductFilters};
use crate::state::AppState;

/// List one page of products matching the query.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ProductParams>,
) -> Result<Response> {
    let (items, meta) = ProductRepository::new(state.pool()).list(&params).await?;

    let meta_json = serde_json::to_string(&meta)
        .map_err(|e| AppError::Internal(format!("metadata serialization: {e}")))?;
    let meta_value = HeaderValue::from_str(&meta_json)
        .map_err(|e| AppError::Internal(format!("metadata header: {e}")))?;

    let mut response = Json(items).into_response();
    response
        .headers_mut()
        .insert(HeaderName::from_static(PAGINATION_HEADER), meta_value);
    Ok(response)
}

/// Get a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Distinct brand/type facets, cached for a few minutes.
#[instrument(skip(state))]
pub async fn filters(State(state): State<AppState>) -> Result<Json<ProductFilters>> {
    let pool = state.pool().clone();
    let facets = state
        .filters_cache()
        .try_get_with((), async move { ProductRepository::new(&pool).filters().await })
        .await
        .map_err(|e| AppError::Internal(format!("filter facets: {e}")))?;
    Ok(Json(facets))
}
