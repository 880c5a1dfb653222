//! Balances

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::BalancesServiceError;
pub use service::*;
