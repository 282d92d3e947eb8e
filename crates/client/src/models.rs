//! Wire models, mirroring the API's camelCase JSON.

use std::collections::BTreeMap;

use serde::Deserialize;

use driftwood_core::{BuyerToken, MetaData, Price, ProductId};

/// A catalog product as served by the API.
#[derive(Debug, Clone, Deserialize)]
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

/// One basket line with its product snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub picture_url: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub quantity: i32,
}

/// The caller's basket.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub buyer_id: BuyerToken,
    pub items: Vec<BasketItem>,
}

/// Login / currentUser response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub token: String,
    pub basket: Option<Basket>,
}

/// Available filter facets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilters {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}

/// A page of items plus the pagination metadata decoded from the
/// `Pagination` response header.
#[derive(Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub meta_data: MetaData,
}

/// Problem-details error body.
#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}
