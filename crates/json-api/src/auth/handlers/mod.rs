//! Auth Handlers

pub(crate) mod login;
pub(crate) mod register;
pub(crate) mod verify;
