//! Warunks
//!
//! A warunk record releases stock for a day: it snapshots the requested products with
//! their target stock and, when opening, writes those targets onto the catalog.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::WarunksServiceError;
pub use service::*;
