//! Warunk Handlers

pub(crate) mod create;
pub(crate) mod get;

pub(crate) use get::WarunkResponse;
