//! Checkout
//!
//! Purchases of a single product or of a whole cart. Each purchased line debits the
//! buyer's balance, decrements product stock and appends a transaction.

pub mod errors;
pub mod models;
pub mod rules;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
