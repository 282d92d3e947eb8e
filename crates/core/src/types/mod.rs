//! Core types for Driftwood.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod pagination;
pub mod params;
pub mod price;
pub mod token;

pub use id::*;
pub use pagination::{MetaData, PAGINATION_HEADER};
pub use params::{OrderBy, ProductParams};
pub use price::Price;
pub use token::BuyerToken;
