//! Integration tests for accounts and login-time basket reconciliation.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seed data (cargo run -p driftwood-cli -- seed)
//! - The API server running (cargo run -p driftwood-api)
//!
//! Run with: cargo test -p driftwood-integration-tests -- --ignored

use driftwood_client::{Agent, AgentError};
use driftwood_core::ProductParams;
use driftwood_integration_tests::{api_base_url, random_username};

const PASSWORD: &str = "Pa55word1";

fn agent() -> Agent {
    Agent::new(&api_base_url()).expect("Failed to create agent")
}

async fn register_user(agent: &Agent) -> String {
    let username = random_username();
    agent
        .register(&username, &format!("{username}@example.com"), PASSWORD)
        .await
        .expect("Failed to register");
    username
}

async fn any_product_id(agent: &Agent) -> driftwood_core::ProductId {
    let page = agent
        .products(&ProductParams::default())
        .await
        .expect("Failed to list products");
    page.items.first().expect("empty catalog").id
}

// ============================================================================
// Registration & login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_register_and_login() {
    let mut agent = agent();
    let username = register_user(&agent).await;

    let user = agent.login(&username, PASSWORD).await.expect("login");
    assert_eq!(user.email, format!("{username}@example.com"));
    assert!(!user.token.is_empty());
    assert!(user.basket.is_none());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_duplicate_username_rejected() {
    let agent = agent();
    let username = register_user(&agent).await;

    let err = agent
        .register(&username, "other@example.com", PASSWORD)
        .await
        .expect_err("expected validation error");
    match err {
        AgentError::Validation(messages) => {
            assert!(messages.iter().any(|m| m.contains("taken")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_weak_password_rejected() {
    let agent = agent();
    let username = random_username();
    let err = agent
        .register(&username, &format!("{username}@example.com"), "short")
        .await
        .expect_err("expected validation error");
    assert!(matches!(err, AgentError::Validation(_)));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_bad_credentials_unauthorized() {
    let mut agent = agent();
    let username = register_user(&agent).await;

    let err = agent
        .login(&username, "WrongPassword1")
        .await
        .expect_err("expected unauthorized");
    assert!(matches!(err, AgentError::Unauthorized(_)));
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_current_user_rotates_token() {
    let mut agent = agent();
    let username = register_user(&agent).await;
    let login = agent.login(&username, PASSWORD).await.expect("login");

    let current = agent.current_user().await.expect("currentUser");
    assert_eq!(current.email, login.email);
    assert!(!current.token.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server"]
async fn test_current_user_without_token_unauthorized() {
    let mut agent = agent();
    let err = agent.current_user().await.expect_err("expected 401");
    assert!(matches!(err, AgentError::Unauthorized(_)));
}

// ============================================================================
// Basket reconciliation at login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_anonymous_basket_taken_over_at_login() {
    let mut agent = agent();
    let username = register_user(&agent).await;
    let product_id = any_product_id(&agent).await;

    // build an anonymous basket; the agent's cookie jar picks up buyerId
    agent.add_basket_item(product_id, 2).await.expect("add");

    let user = agent.login(&username, PASSWORD).await.expect("login");
    let basket = user.basket.expect("anonymous basket not carried over");
    assert_eq!(basket.items.len(), 1);
    assert_eq!(basket.items[0].quantity, 2);

    // the basket is now keyed by username, reachable via the bearer token
    let basket = agent.basket().await.expect("get basket");
    assert_eq!(basket.items[0].product_id, product_id);
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_anonymous_basket_replaces_existing_user_basket() {
    let product_a = any_product_id(&agent()).await;

    // session 1: log in and build a user basket
    let mut first = agent();
    let username = register_user(&first).await;
    first.login(&username, PASSWORD).await.expect("login");
    first.add_basket_item(product_a, 1).await.expect("add");

    // session 2: anonymous basket with a different quantity
    let mut second = agent();
    second.add_basket_item(product_a, 7).await.expect("add");
    let user = second.login(&username, PASSWORD).await.expect("login");

    // the anonymous basket won
    let basket = user.basket.expect("basket missing");
    assert_eq!(basket.items[0].quantity, 7);
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_login_without_anonymous_basket_keeps_user_basket() {
    let product_id = any_product_id(&agent()).await;

    let mut first = agent();
    let username = register_user(&first).await;
    first.login(&username, PASSWORD).await.expect("login");
    first.add_basket_item(product_id, 3).await.expect("add");

    // fresh session with no cookie
    let mut second = agent();
    let user = second.login(&username, PASSWORD).await.expect("login");
    let basket = user.basket.expect("user basket missing");
    assert_eq!(basket.items[0].quantity, 3);
}

#[tokio::test]
#[ignore = "Requires running API server with seed data"]
async fn test_login_clears_buyer_cookie_when_anonymous_basket_consumed() {
    // raw client so Set-Cookie is observable
    let http = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client");
    let base = api_base_url();

    let typed = agent();
    let username = register_user(&typed).await;
    let product_id = any_product_id(&typed).await;

    // anonymous add issues the cookie into this jar
    let resp = http
        .post(format!("{base}basket"))
        .query(&[("productId", product_id.to_string()), ("quantity", "1".into())])
        .send()
        .await
        .expect("add");
    assert!(resp.status().is_success());

    let resp = http
        .post(format!("{base}account/login"))
        .json(&serde_json::json!({ "username": username, "password": PASSWORD }))
        .send()
        .await
        .expect("login");
    assert!(resp.status().is_success());

    // the anonymous token was consumed, so the cookie is expired out
    let cleared = resp
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("buyerId="))
        .expect("buyerId cookie not cleared");
    assert!(cleared.contains("Max-Age=0"));
}
