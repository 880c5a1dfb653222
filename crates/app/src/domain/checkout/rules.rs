//! Purchase rules applied to each purchased line.

use crate::domain::{checkout::CheckoutError, products::models::Product};

/// Check that `quantity` of `product` can be sold.
pub fn ensure_purchasable(product: &Product, quantity: u64) -> Result<(), CheckoutError> {
    if quantity == 0 {
        return Err(CheckoutError::InvalidQuantity);
    }

    if product.stock == 0 {
        return Err(CheckoutError::OutOfStock {
            product: product.name.clone(),
        });
    }

    if product.stock < quantity {
        return Err(CheckoutError::InsufficientStock {
            product: product.name.clone(),
        });
    }

    Ok(())
}

/// Cost of `quantity` units at `price`.
pub fn line_cost(price: u64, quantity: u64) -> Result<u64, CheckoutError> {
    price
        .checked_mul(quantity)
        .ok_or(CheckoutError::CostOverflow)
}
