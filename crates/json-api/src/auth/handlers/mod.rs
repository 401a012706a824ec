//! Auth Handlers

pub(crate) mod change_password;
pub(crate) mod login;
pub(crate) mod profile;
pub(crate) mod verify;
