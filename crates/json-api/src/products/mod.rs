//! Products

mod errors;
pub(crate) mod handlers;
mod requests;
mod responses;

pub(crate) use errors::into_status_error;
pub(crate) use handlers::*;
pub(crate) use responses::*;
