//! Product List Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Product List UUID
pub type ProductListUuid = TypedUuid<ProductList>;

/// Product List Item UUID
pub type ProductListItemUuid = TypedUuid<ProductListItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Favorite,
    Wishlist,
}

impl ListKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::Wishlist => "wishlist",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownListKind(pub String);

impl fmt::Display for UnknownListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown list kind {:?}", self.0)
    }
}

impl std::error::Error for UnknownListKind {}

impl FromStr for ListKind {
    type Err = UnknownListKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "favorite" => Ok(Self::Favorite),
            "wishlist" => Ok(Self::Wishlist),
            other => Err(UnknownListKind(other.to_string())),
        }
    }
}

/// Product List Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductList {
    pub uuid: ProductListUuid,
    pub user_uuid: UserUuid,
    pub kind: ListKind,
    pub items: Vec<ProductListItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product snapshot taken when the product was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListItem {
    pub uuid: ProductListItemUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub product_name: String,
    pub product_price: u64,
    pub product_image: String,
    pub product_category: String,
    pub created_at: Timestamp,
}

/// Outcome of removing a product from a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedListItem {
    pub list: ProductListUuid,
    pub product_name: String,
    pub list_deleted: bool,
}
