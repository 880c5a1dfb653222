//! Product Models

use jiff::Timestamp;

use crate::{
    domain::query::{ListQuery, QueryField, ValueKind},
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub slug: String,
    pub name: String,
    pub detail: String,
    pub price: u64,
    pub stock: u64,
    pub category: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub detail: String,
    pub price: u64,
    pub stock: u64,
    pub category: String,
    pub image: String,
}

/// Product Update Model
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub detail: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u64>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// Product columns available to catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Category,
    Price,
    Stock,
    CreatedAt,
}

impl QueryField for ProductField {
    fn column(self) -> &'static str {
        match self {
            Self::Name => "products.name",
            Self::Category => "products.category",
            Self::Price => "products.price",
            Self::Stock => "products.stock",
            Self::CreatedAt => "products.created_at",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            Self::Name | Self::Category => ValueKind::Text,
            Self::Price | Self::Stock => ValueKind::Integer,
            Self::CreatedAt => ValueKind::Timestamp,
        }
    }
}

/// Catalog listing query.
pub type ProductQuery = ListQuery<ProductField>;
