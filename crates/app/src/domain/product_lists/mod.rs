//! Product Lists
//!
//! Favorites and wishlists share one implementation keyed by [`models::ListKind`].

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::ProductListsServiceError;
pub use service::*;
