//! Catalog component: query parameters, fetch orchestration, and the
//! normalized product cache.
//!
//! [`Catalog`] drives an [`Agent`] through the state transitions of
//! [`CatalogState`]: every fetch moves the status to a pending variant, and
//! both success and failure return it to idle. On failure the error is
//! propagated to the caller while the cache keeps its last good contents.

pub mod state;

pub use state::{CatalogState, CatalogStatus};

use driftwood_core::{ProductId, ProductParams};

use crate::agent::Agent;
use crate::error::AgentError;
use crate::models::{Product, ProductFilters};

/// The catalog component: an API agent plus the normalized cache it feeds.
#[derive(Debug)]
pub struct Catalog {
    agent: Agent,
    state: CatalogState,
}

impl Catalog {
    /// Build a catalog over an existing agent.
    #[must_use]
    pub fn new(agent: Agent) -> Self {
        Self {
            agent,
            state: CatalogState::new(),
        }
    }

    /// Read-only view of the cache.
    #[must_use]
    pub const fn state(&self) -> &CatalogState {
        &self.state
    }

    /// The underlying agent, for callers that need other API surfaces.
    #[must_use]
    pub const fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Fetch the page described by the current parameters, replacing the
    /// cached page on success.
    ///
    /// # Errors
    ///
    /// Propagates the agent error; the cache is left untouched and the
    /// status returns to idle.
    pub async fn fetch_products(&mut self) -> Result<(), AgentError> {
        self.state.start_fetch_products();
        match self.agent.products(self.state.params()).await {
            Ok(page) => {
                self.state.complete_fetch_products(page.items, page.meta_data);
                Ok(())
            }
            Err(err) => {
                self.state.fail_fetch();
                Err(err)
            }
        }
    }

    /// Fetch the current page only if it is not already loaded.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_products`].
    pub async fn ensure_products(&mut self) -> Result<(), AgentError> {
        if self.state.products_loaded() {
            return Ok(());
        }
        self.fetch_products().await
    }

    /// Fetch a single product into the cache, skipping the network when it
    /// is already present.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotFound`] for unknown ids.
    pub async fn fetch_product(&mut self, id: ProductId) -> Result<(), AgentError> {
        if self.state.product(id).is_some() {
            return Ok(());
        }
        self.state.start_fetch_product();
        match self.agent.product(id).await {
            Ok(product) => {
                self.state.complete_fetch_product(product);
                Ok(())
            }
            Err(err) => {
                self.state.fail_fetch();
                Err(err)
            }
        }
    }

    /// Fetch the filter facets, skipping the network once loaded.
    ///
    /// # Errors
    ///
    /// Propagates the agent error; previously loaded facets survive.
    pub async fn fetch_filters(&mut self) -> Result<(), AgentError> {
        if self.state.filters_loaded() {
            return Ok(());
        }
        self.state.start_fetch_filters();
        match self.agent.filters().await {
            Ok(filters) => {
                self.state.complete_fetch_filters(filters);
                Ok(())
            }
            Err(err) => {
                self.state.fail_fetch();
                Err(err)
            }
        }
    }

    /// Change filter/sort/search parameters; resets to page 1 and marks the
    /// page for refetch.
    pub fn set_params(&mut self, apply: impl FnOnce(&mut ProductParams)) {
        self.state.set_params(apply);
    }

    /// Move to a page of the same query, preserving all other parameters.
    pub fn set_page_number(&mut self, page_number: u32) {
        self.state.set_page_number(page_number);
    }

    /// Reset the query to its defaults.
    pub fn reset_params(&mut self) {
        self.state.reset_params();
    }

    /// Insert or replace a product locally.
    pub fn upsert_product(&mut self, product: Product) {
        self.state.upsert_product(product);
    }

    /// Remove a product locally.
    pub fn remove_product(&mut self, id: ProductId) {
        self.state.remove_product(id);
    }

    /// The loaded filter facets.
    #[must_use]
    pub const fn filters(&self) -> &ProductFilters {
        self.state.filters()
    }
}
