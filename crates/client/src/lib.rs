//! Driftwood headless storefront client.
//!
//! Two layers:
//!
//! - [`agent`] - typed reqwest wrapper over the REST API, carrying the
//!   bearer token and the `buyerId` cookie, and decoding the out-of-band
//!   `Pagination` response header.
//! - [`catalog`] - the catalog query/cache component: a normalized store of
//!   the current page's products, filter facets, and reducer-style state
//!   transitions that survive failed fetches with stale-but-valid data.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod agent;
pub mod catalog;
pub mod error;
pub mod models;

pub use agent::Agent;
pub use catalog::Catalog;
pub use error::AgentError;
