//! Profile Handlers

pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod update;

pub(crate) use get::UserResponse;
