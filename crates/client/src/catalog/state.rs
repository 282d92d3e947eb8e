//! Normalized catalog cache and its state transitions.
//!
//! Products are stored by id in a flat map, with the current page's ids kept
//! in display order alongside. Each page fetch replaces the page wholesale,
//! so the map never grows past one page of entries plus any individually
//! fetched products. Failed fetches return the status to idle and leave every
//! cached entity untouched, so stale-but-valid data keeps rendering.

use std::collections::HashMap;

use driftwood_core::{MetaData, ProductId, ProductParams};

use crate::models::{Product, ProductFilters};

/// What the catalog is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    /// No fetch in flight.
    #[default]
    Idle,
    /// A page listing is being fetched.
    PendingFetchProducts,
    /// A single product is being fetched.
    PendingFetchProduct,
    /// The filter facets are being fetched.
    PendingFetchFilters,
}

/// Normalized catalog cache.
#[derive(Debug, Default)]
pub struct CatalogState {
    entities: HashMap<ProductId, Product>,
    page_ids: Vec<ProductId>,
    status: CatalogStatus,
    products_loaded: bool,
    filters_loaded: bool,
    filters: ProductFilters,
    params: ProductParams,
    meta_data: Option<MetaData>,
}

impl CatalogState {
    /// Fresh state with default query parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- selectors ---

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> CatalogStatus {
        self.status
    }

    /// Whether the current page's listing is loaded and current.
    #[must_use]
    pub const fn products_loaded(&self) -> bool {
        self.products_loaded
    }

    /// Whether the filter facets are loaded.
    #[must_use]
    pub const fn filters_loaded(&self) -> bool {
        self.filters_loaded
    }

    /// The loaded filter facets.
    #[must_use]
    pub const fn filters(&self) -> &ProductFilters {
        &self.filters
    }

    /// The active query parameters.
    #[must_use]
    pub const fn params(&self) -> &ProductParams {
        &self.params
    }

    /// Pagination metadata from the last successful page fetch.
    #[must_use]
    pub const fn meta_data(&self) -> Option<&MetaData> {
        self.meta_data.as_ref()
    }

    /// Look up a single cached product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.entities.get(&id)
    }

    /// The current page's products in display order.
    ///
    /// Ids without a backing entity are skipped; that only happens
    /// transiently if an entity was removed out from under the page.
    #[must_use]
    pub fn products(&self) -> Vec<&Product> {
        self.page_ids
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    // --- parameter transitions ---

    /// Change filter/sort/search parameters.
    ///
    /// Any such change invalidates the loaded page and snaps back to page 1,
    /// since the old page position is meaningless under a new query.
    pub fn set_params(&mut self, apply: impl FnOnce(&mut ProductParams)) {
        apply(&mut self.params);
        self.params.page_number = 1;
        self.products_loaded = false;
    }

    /// Move to a different page of the same query.
    ///
    /// Unlike [`Self::set_params`], every other field is preserved.
    pub fn set_page_number(&mut self, page_number: u32) {
        self.params.page_number = page_number;
        self.products_loaded = false;
    }

    /// Reset all parameters to their defaults and invalidate the page.
    pub fn reset_params(&mut self) {
        self.params = ProductParams::default();
        self.products_loaded = false;
    }

    // --- fetch lifecycle ---

    /// A page listing fetch has started.
    pub fn start_fetch_products(&mut self) {
        self.status = CatalogStatus::PendingFetchProducts;
    }

    /// A page listing fetch succeeded: replace the page wholesale.
    pub fn complete_fetch_products(&mut self, products: Vec<Product>, meta_data: MetaData) {
        self.page_ids = products.iter().map(|p| p.id).collect();
        self.entities = products.into_iter().map(|p| (p.id, p)).collect();
        self.meta_data = Some(meta_data);
        self.products_loaded = true;
        self.status = CatalogStatus::Idle;
    }

    /// A single-product fetch has started.
    pub fn start_fetch_product(&mut self) {
        self.status = CatalogStatus::PendingFetchProduct;
    }

    /// A single-product fetch succeeded: upsert the entity.
    ///
    /// The page id list is not touched; a product fetched by id may or may
    /// not belong to the current page.
    pub fn complete_fetch_product(&mut self, product: Product) {
        self.entities.insert(product.id, product);
        self.status = CatalogStatus::Idle;
    }

    /// A filter facet fetch has started.
    pub fn start_fetch_filters(&mut self) {
        self.status = CatalogStatus::PendingFetchFilters;
    }

    /// A filter facet fetch succeeded.
    pub fn complete_fetch_filters(&mut self, filters: ProductFilters) {
        self.filters = filters;
        self.filters_loaded = true;
        self.status = CatalogStatus::Idle;
    }

    /// Any fetch failed: back to idle, cached entities untouched.
    pub fn fail_fetch(&mut self) {
        self.status = CatalogStatus::Idle;
    }

    // --- local mutations ---

    /// Insert or replace a product locally and invalidate the page listing,
    /// since its membership or position may have changed.
    pub fn upsert_product(&mut self, product: Product) {
        self.entities.insert(product.id, product);
        self.products_loaded = false;
    }

    /// Remove a product locally and invalidate the page listing.
    pub fn remove_product(&mut self, id: ProductId) {
        self.entities.remove(&id);
        self.page_ids.retain(|page_id| *page_id != id);
        self.products_loaded = false;
    }
}
