//! Product List Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod remove;

pub(crate) use get::ProductListResponse;
