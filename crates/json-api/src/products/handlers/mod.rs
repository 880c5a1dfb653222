//! Product Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod slug;
pub(crate) mod update;

pub(crate) use get::ProductResponse;
