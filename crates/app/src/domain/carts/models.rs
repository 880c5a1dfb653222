//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLine>;

/// Cart Model
///
/// `total` is the sum of the line quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub total: u64,
    pub lines: Vec<CartLine>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Line Model
///
/// Product fields are a snapshot taken when the product was first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub product_name: String,
    pub product_price: u64,
    pub product_image: String,
    pub product_category: String,
    pub quantity: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Line Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub product: ProductUuid,
    pub quantity: u64,
}

/// Outcome of removing a product from a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedLine {
    pub cart: CartUuid,
    pub product_name: String,
    /// Whether the cart was deleted because it became empty.
    pub cart_deleted: bool,
}
