//! Warunk Models

use std::{fmt, str::FromStr};

use jiff::{Timestamp, tz::TimeZone};

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Warunk UUID
pub type WarunkUuid = TypedUuid<Warunk>;

/// Warunk Item UUID
pub type WarunkItemUuid = TypedUuid<WarunkItem>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarunkStatus {
    Open,
    Closed,
}

impl WarunkStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Buka",
            Self::Closed => "Tutup",
        }
    }
}

impl fmt::Display for WarunkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWarunkStatus(pub String);

impl fmt::Display for UnknownWarunkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown warunk status {:?}", self.0)
    }
}

impl std::error::Error for UnknownWarunkStatus {}

impl FromStr for WarunkStatus {
    type Err = UnknownWarunkStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Buka" => Ok(Self::Open),
            "Tutup" => Ok(Self::Closed),
            other => Err(UnknownWarunkStatus(other.to_string())),
        }
    }
}

/// Warunk Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warunk {
    pub uuid: WarunkUuid,
    pub user_uuid: UserUuid,
    pub status: WarunkStatus,
    pub items: Vec<WarunkItem>,
    pub created_at: Timestamp,
}

/// Product snapshot with the stock released for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarunkItem {
    pub uuid: WarunkItemUuid,
    pub product_uuid: ProductUuid,
    pub product_slug: String,
    pub product_name: String,
    pub product_price: u64,
    pub product_category: String,
    pub stock: u64,
}

/// Requested stock level for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockTarget {
    pub product: ProductUuid,
    pub stock: u64,
}

/// New Warunk Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWarunk {
    pub status: WarunkStatus,
    pub items: Vec<StockTarget>,
}

/// Whether two instants fall on the same UTC calendar date.
#[must_use]
pub fn same_utc_day(previous: Timestamp, now: Timestamp) -> bool {
    previous.to_zoned(TimeZone::UTC).date() == now.to_zoned(TimeZone::UTC).date()
}
