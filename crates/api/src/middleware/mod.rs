//! Request extractors and cookie plumbing.

pub mod auth;
pub mod buyer;

pub use auth::{CurrentUser, MaybeUser};
pub use buyer::{BUYER_COOKIE, BuyerId};
