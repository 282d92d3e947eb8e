//! Domain models and wire DTOs.

pub mod basket;
pub mod product;
pub mod user;
