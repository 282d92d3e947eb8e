//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (verifies database)
//!
//! # Account
//! POST /api/account/login           - Login; reconciles anonymous basket
//! POST /api/account/register        - Register (201 or field errors)
//! GET  /api/account/currentUser     - Current user + basket (bearer auth)
//!
//! # Basket
//! GET    /api/basket                - Caller's basket or 404
//! POST   /api/basket?productId&quantity - Add item (creates basket + cookie)
//! DELETE /api/basket?productId&quantity - Remove item quantity
//!
//! # Catalog
//! GET  /api/products                - Paged listing; metadata in Pagination header
//! GET  /api/products/filters        - Distinct brand/type facets (cached)
//! GET  /api/products/{id}           - Single product
//!
//! # Error probes (exercise the error taxonomy end-to-end)
//! GET  /api/buggy/not-found
//! GET  /api/buggy/bad-request
//! GET  /api/buggy/unauthorised
//! GET  /api/buggy/validation-error
//! GET  /api/buggy/server-error
//! ```

pub mod account;
pub mod basket;
pub mod buggy;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(account_routes())
        .merge(basket_routes())
        .merge(product_routes())
        .merge(buggy_routes())
}

/// Create the account routes router.
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/api/account/login", post(account::login))
        .route("/api/account/register", post(account::register))
        .route("/api/account/currentUser", get(account::current_user))
}

/// Create the basket routes router.
fn basket_routes() -> Router<AppState> {
    Router::new().route(
        "/api/basket",
        get(basket::show).post(basket::add).delete(basket::remove),
    )
}

/// Create the catalog routes router.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index))
        .route("/api/products/filters", get(products::filters))
        .route("/api/products/{id}", get(products::show))
}

/// Create the error-probe routes router.
fn buggy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/buggy/not-found", get(buggy::not_found))
        .route("/api/buggy/bad-request", get(buggy::bad_request))
        .route("/api/buggy/unauthorised", get(buggy::unauthorised))
        .route("/api/buggy/validation-error", get(buggy::validation_error))
        .route("/api/buggy/server-error", get(buggy::server_error))
}
