//! Catalog product entity.
//!
//! Read-only reference data from the basket core's perspective. The wire
//! shape is camelCase, with `product_type` exposed as `type`.

use serde::Serialize;
use sqlx::FromRow;

use driftwood_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub picture_url: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub quantity_in_stock: i32,
}

/// Available filter facets: distinct brands and types across the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ProductFilters {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}
