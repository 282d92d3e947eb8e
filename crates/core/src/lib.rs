//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across all Driftwood components:
//! - `api` - REST storefront backend
//! - `client` - Headless storefront client (API agent + catalog cache)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, buyer tokens, prices, catalog query parameters,
//!   and pagination metadata

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
