//! Integration tests for Driftwood.
//!
//! These tests run against a live API server and are `#[ignore]`d by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations + seed data
//! cargo run -p driftwood-cli -- migrate
//! cargo run -p driftwood-cli -- seed
//!
//! # Start the API server
//! cargo run -p driftwood-api
//!
//! # Run the ignored integration tests
//! cargo test -p driftwood-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `account` - registration, login, and basket reconciliation
//! - `basket` - basket CRUD and the buyerId cookie contract
//! - `catalog` - product listing, pagination, filtering
//! - `errors` - the error taxonomy via the /api/buggy probes

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000/api/".to_string())
}

/// A unique username for test isolation.
#[must_use]
pub fn random_username() -> String {
    format!("it-user-{}", uuid::Uuid::new_v4().simple())
}
