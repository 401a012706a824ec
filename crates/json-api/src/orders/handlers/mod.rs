//! Order Handlers

pub(crate) mod create;
pub(crate) mod custom;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod payment;
pub(crate) mod payment_success;
pub(crate) mod stats;
pub(crate) mod status;
pub(crate) mod update;
