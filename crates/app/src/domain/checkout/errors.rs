//! Checkout errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;
use tokio::time::error::Elapsed;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("product not found")]
    ProductNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("balance not found")]
    BalanceNotFound,

    #[error("please enter the quantity to purchase")]
    InvalidQuantity,

    #[error("product '{product}' is sold out")]
    OutOfStock { product: String },

    #[error("not enough stock for product '{product}'")]
    InsufficientStock { product: String },

    #[error("insufficient balance to buy product '{product}'")]
    InsufficientFunds { product: String },

    #[error("purchase cost is too large")]
    CostOverflow,

    #[error("invalid amount")]
    InvalidAmount(#[from] TryFromIntError),

    #[error("checkout timed out")]
    Timeout(#[from] Elapsed),

    #[error("storage error")]
    Sql(#[from] Error),
}

impl CheckoutError {
    /// Whether the purchase was refused by a business rule rather than failing.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound
                | Self::UserNotFound
                | Self::CartNotFound
                | Self::EmptyCart
                | Self::BalanceNotFound
                | Self::InvalidQuantity
                | Self::OutOfStock { .. }
                | Self::InsufficientStock { .. }
                | Self::InsufficientFunds { .. }
                | Self::CostOverflow
        )
    }
}
