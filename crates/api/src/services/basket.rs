//! Basket reconciliation at login.
//!
//! When a user authenticates we may hold two baskets: one saved under their
//! username and one accumulated anonymously under the `buyerId` cookie token.
//! At most one survives. The policy is last-anonymous-wins: the anonymous
//! basket replaces any previously saved signed-in basket wholesale (no
//! item-by-item merge). Preserved for compatibility with the original
//! storefront behavior.

use sqlx::PgPool;

use driftwood_core::BuyerToken;

use crate::db::RepositoryError;
use crate::db::baskets::BasketRepository;
use crate::models::basket::Basket;

/// Result of reconciling baskets at login.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// The single surviving basket, if any.
    pub basket: Option<Basket>,
    /// True when the anonymous basket was taken over by the user; the caller
    /// must clear the client-side `buyerId` cookie.
    pub consumed_anonymous: bool,
}

/// Resolve which basket survives when `username` authenticates.
///
/// Both lookups are independent fetches by buyer token, items included. When
/// an anonymous basket exists, any user basket is deleted and the anonymous
/// basket's owner key is rewritten to the username - both changes commit in
/// one transaction, so no partial reassignment is ever visible.
///
/// # Errors
///
/// Returns `RepositoryError` if a lookup fails or the transaction cannot
/// commit; in the latter case neither change lands.
pub async fn reconcile(
    pool: &PgPool,
    username: &str,
    anon_token: Option<&BuyerToken>,
) -> Result<ReconcileOutcome, RepositoryError> {
    let repo = BasketRepository::new(pool);
    let user_token = BuyerToken::user(username);

    let user_basket = repo.get_by_token(&user_token).await?;

    // A cookie that already carries the username is not an anonymous basket.
    let anon_basket = match anon_token {
        Some(token) if *token != user_token => repo.get_by_token(token).await?,
        _ => None,
    };

    let Some(mut anon_basket) = anon_basket else {
        return Ok(ReconcileOutcome {
            basket: user_basket,
            consumed_anonymous: false,
        });
    };

    let mut tx = pool.begin().await?;

    if let Some(user_basket) = user_basket {
        sqlx::query("DELETE FROM baskets WHERE id = $1")
            .bind(user_basket.id)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("UPDATE baskets SET buyer_token = $1 WHERE id = $2")
        .bind(&user_token)
        .bind(anon_basket.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    anon_basket.buyer_token = user_token;
    tracing::info!(
        basket_id = %anon_basket.id,
        username,
        "anonymous basket reassigned at login"
    );

    Ok(ReconcileOutcome {
        basket: Some(anon_basket),
        consumed_anonymous: true,
    })
}
