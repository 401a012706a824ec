//! Storefront Domain Concerns

pub mod orders;
pub mod products;
