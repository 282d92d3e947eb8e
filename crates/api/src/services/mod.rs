//! Application services.

pub mod auth;
pub mod basket;
