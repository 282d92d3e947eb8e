//! Integration tests for basket operations and the buyerId cookie.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seed data (cargo run -p driftwood-cli -- seed)
//! - The API server running (cargo run -p driftwood-api)
//!
//! Run with: cargo test -p driftwood-integration-tests -- --ignored

use driftwood_client::{Agent, AgentError};
use driftwood_core::ProductParams;
use driftwood_integration_tests::api_base_url;
use reqwest::StatusCode;

fn agent() -> Agent {
    Agent::new(&api_base_url()).expect("Failed to create agent")
}

async fn any_product_id(agent: &Agent) -> driftwood_core::ProductId {
    let page = agent
        .products(&ProductParams::default())
        .await
        .expect("Failed to list products");
    page.items.first().expect("empty catalog").id
}

// ============================================================================
// Anonymous basket lifecycle
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_no_basket_is_not_found() {
    let agent = agent();
    let err = agent.basket().await.expect_err("expected 404");
    assert!(matches!(err, AgentError::NotFound(_)));
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_first_add_creates_basket_and_sets_cookie() {
    // raw client so the Set-Cookie header is observable
    let http = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client");
    let base = api_base_url();

    let typed = agent();
    let product_id = any_product_id(&typed).await;

    let resp = http
        .post(format!("{base}basket"))
        .query(&[("productId", product_id.to_string()), ("quantity", "2".into())])
        .send()
        .await
        .expect("Failed to add item");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let set_cookie = resp
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("buyerId="))
        .expect("buyerId cookie not set")
        .to_owned();
    assert!(set_cookie.contains("Max-Age=2592000"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("SameSite=Lax"));
    // the client script must be able to read it
    assert!(!set_cookie.contains("HttpOnly"));

    // the cookie now identifies the basket
    let resp = http
        .get(format!("{base}basket"))
        .send()
        .await
        .expect("Failed to get basket");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_add_same_product_accumulates_quantity() {
    let agent = agent();
    let product_id = any_product_id(&agent).await;

    agent
        .add_basket_item(product_id, 2)
        .await
        .expect("first add");
    let basket = agent
        .add_basket_item(product_id, 3)
        .await
        .expect("second add");

    let item = basket
        .items
        .iter()
        .find(|i| i.product_id == product_id)
        .expect("item missing");
    assert_eq!(item.quantity, 5);
    assert_eq!(basket.items.len(), 1);
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_remove_prunes_line_at_zero() {
    let agent = agent();
    let product_id = any_product_id(&agent).await;

    agent.add_basket_item(product_id, 5).await.expect("add");
    agent
        .remove_basket_item(product_id, 2)
        .await
        .expect("partial remove");

    let basket = agent.basket().await.expect("get basket");
    let item = basket
        .items
        .iter()
        .find(|i| i.product_id == product_id)
        .expect("item missing");
    assert_eq!(item.quantity, 3);

    agent
        .remove_basket_item(product_id, 3)
        .await
        .expect("full remove");
    let basket = agent.basket().await.expect("get basket");
    assert!(!basket.items.iter().any(|i| i.product_id == product_id));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_add_unknown_product_is_a_problem() {
    let agent = agent();
    let err = agent
        .add_basket_item(driftwood_core::ProductId::new(999_999), 1)
        .await
        .expect_err("expected problem");
    assert!(matches!(err, AgentError::Problem { status: 400, .. }));
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_non_positive_quantity_rejected() {
    let agent = agent();
    let product_id = any_product_id(&agent).await;

    let err = agent
        .add_basket_item(product_id, 0)
        .await
        .expect_err("expected problem");
    assert!(matches!(err, AgentError::Problem { status: 400, .. }));

    // removal is decrement-only; a negative quantity must not sneak an
    // increment past the basket
    agent.add_basket_item(product_id, 2).await.expect("add");
    let err = agent
        .remove_basket_item(product_id, -3)
        .await
        .expect_err("expected problem");
    assert!(matches!(err, AgentError::Problem { status: 400, .. }));

    let basket = agent.basket().await.expect("get basket");
    let item = basket
        .items
        .iter()
        .find(|i| i.product_id == product_id)
        .expect("item missing");
    assert_eq!(item.quantity, 2);
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_remove_from_missing_basket_is_not_found() {
    let agent = agent();
    let product_id = any_product_id(&agent).await;

    // fresh agent: no cookie, no basket
    let err = agent
        .remove_basket_item(product_id, 1)
        .await
        .expect_err("expected not found");
    assert!(matches!(err, AgentError::NotFound(_)));
}
