//! Transactions

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::TransactionsServiceError;
pub use service::*;
