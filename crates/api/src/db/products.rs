//! Product repository for catalog queries.
//!
//! The list query is assembled dynamically with `QueryBuilder`: the search
//! term and filter sets only contribute `WHERE` clauses when present, so an
//! omitted filter never constrains the query.

use sqlx::{PgPool, Postgres, QueryBuilder};

use driftwood_core::{MetaData, OrderBy, ProductId, ProductParams};

use super::RepositoryError;
use crate::models::product::{Product, ProductFilters};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, picture_url, brand, product_type, quantity_in_stock";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of products matching `params`, plus pagination metadata.
    ///
    /// The metadata reflects the total count across all pages; the returned
    /// items are only the requested page.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list(
        &self,
        params: &ProductParams,
    ) -> Result<(Vec<Product>, MetaData), RepositoryError> {
        let page = params.page_number();
        let size = params.page_size();

        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM products");
        push_filters(&mut count_query, params);
        let total_count: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        let mut query =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products"));
        push_filters(&mut query, params);
        query.push(match params.order_by {
            OrderBy::Name => " ORDER BY name ASC, id ASC",
            OrderBy::Price => " ORDER BY price ASC, id ASC",
            OrderBy::PriceDesc => " ORDER BY price DESC, id ASC",
        });
        query.push(" LIMIT ").push_bind(i64::from(size));
        query
            .push(" OFFSET ")
            .push_bind(i64::from((page - 1) * size));

        let items = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        let meta = MetaData::new(page, size, total_count.unsigned_abs());
        Ok((items, meta))
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(product)
    }

    /// Distinct brand and type facets across the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn filters(&self) -> Result<ProductFilters, RepositoryError> {
        let brands: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT brand FROM products ORDER BY brand")
                .fetch_all(self.pool)
                .await?;
        let types: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT product_type FROM products ORDER BY product_type")
                .fetch_all(self.pool)
                .await?;
        Ok(ProductFilters { brands, types })
    }
}

/// Append `WHERE` clauses for the optional search term and filter sets.
fn push_filters<'q>(query: &mut QueryBuilder<'q, Postgres>, params: &'q ProductParams) {
    let mut prefix = " WHERE ";

    if let Some(term) = params.search_term.as_deref()
        && !term.is_empty()
    {
        query
            .push(prefix)
            .push("name ILIKE ")
            .push_bind(format!("%{term}%"));
        prefix = " AND ";
    }

    if !params.brands.is_empty() {
        query
            .push(prefix)
            .push("brand = ANY(")
            .push_bind(&params.brands)
            .push(")");
        prefix = " AND ";
    }

    if !params.types.is_empty() {
        query
            .push(prefix)
            .push("product_type = ANY(")
            .push_bind(&params.types)
            .push(")");
    }
}
