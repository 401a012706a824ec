//! Storefront domain and persistence: users, catalog and orders.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;
pub mod uuids;

#[cfg(test)]
mod test;
