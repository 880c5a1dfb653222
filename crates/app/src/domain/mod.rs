//! Warunk Domain Concerns

pub mod balances;
pub mod carts;
pub mod checkout;
pub mod product_lists;
pub mod products;
pub mod query;
pub mod transactions;
pub mod users;
pub mod warunks;
