//! Orders

pub mod access;
pub mod data;
mod errors;
pub mod records;
mod repository;
mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
