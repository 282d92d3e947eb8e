//! Basket repository.
//!
//! Baskets are keyed by buyer token (username or anonymous UUID). Reads
//! eagerly include items joined with their product snapshots, matching what
//! the basket DTO needs in one round trip per aggregate.

use sqlx::{FromRow, PgPool};

use driftwood_core::{BasketId, BuyerToken};

use super::RepositoryError;
use crate::models::basket::{Basket, BasketItem};

#[derive(FromRow)]
struct BasketRow {
    id: BasketId,
    buyer_token: BuyerToken,
}

const ITEM_COLUMNS: &str = "bi.product_id, p.name, p.price, p.picture_url, \
     p.brand, p.product_type, bi.quantity";

/// Repository for basket database operations.
pub struct BasketRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BasketRepository<'a> {
    /// Create a new basket repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the basket owned by `token`, items included, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_token(
        &self,
        token: &BuyerToken,
    ) -> Result<Option<Basket>, RepositoryError> {
        let row = sqlx::query_as::<_, BasketRow>(
            "SELECT id, buyer_token FROM baskets WHERE buyer_token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM basket_items bi \
             JOIN products p ON p.id = bi.product_id \
             WHERE bi.basket_id = $1 ORDER BY bi.id"
        );
        let items = sqlx::query_as::<_, BasketItem>(&sql)
            .bind(row.id)
            .fetch_all(self.pool)
            .await?;

        Ok(Some(Basket {
            id: row.id,
            buyer_token: row.buyer_token,
            items,
        }))
    }

    /// Create an empty basket owned by `token`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a basket already exists for the
    /// token, `RepositoryError::Database` otherwise.
    pub async fn create(&self, token: &BuyerToken) -> Result<Basket, RepositoryError> {
        let id: BasketId = sqlx::query_scalar(
            "INSERT INTO baskets (buyer_token) VALUES ($1) RETURNING id",
        )
        .bind(token)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("basket already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(Basket {
            id,
            buyer_token: token.clone(),
            items: Vec::new(),
        })
    }

    /// Persist the basket's current item set, replacing whatever is stored.
    ///
    /// Runs in a single transaction; racing writers are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; nothing is
    /// committed in that case.
    pub async fn save_items(&self, basket: &Basket) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM basket_items WHERE basket_id = $1")
            .bind(basket.id)
            .execute(&mut *tx)
            .await?;

        for item in &basket.items {
            sqlx::query(
                "INSERT INTO basket_items (basket_id, product_id, quantity) \
                 VALUES ($1, $2, $3)",
            )
            .bind(basket.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete a basket and its items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: BasketId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM baskets WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}
