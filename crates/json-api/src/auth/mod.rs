//! Authentication

mod errors;
pub(crate) mod handlers;
pub(crate) mod middleware;
mod responses;
pub(crate) mod roles;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use responses::*;
