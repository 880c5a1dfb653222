//! Products

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;
pub mod slug;

pub use errors::ProductsServiceError;
pub use service::*;
