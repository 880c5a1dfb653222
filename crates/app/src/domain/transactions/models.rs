//! Transaction Models
//!
//! A transaction is one completed purchase line. Rows are append-only.

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        products::models::ProductUuid,
        query::{ListQuery, QueryField, ValueKind},
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<Transaction>;

/// Terminal state of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Succeeded,
}

impl TransactionStatus {
    /// Stored and displayed label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "Berhasil",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction status {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for TransactionStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Berhasil" => Ok(Self::Succeeded),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Transaction Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub uuid: TransactionUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
}

/// New Transaction Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub status: TransactionStatus,
}

/// Purchase history line shown to the buyer.
///
/// Prices are the product's current price, including products that were deleted
/// after the purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHistoryEntry {
    pub transaction_uuid: TransactionUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub image: String,
    pub unit_price: u64,
    pub quantity: u64,
    pub total_price: u64,
    pub purchased_at: Timestamp,
}

/// Transaction columns available to log queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionField {
    User,
    Product,
    Status,
    Quantity,
    CreatedAt,
}

impl QueryField for TransactionField {
    fn column(self) -> &'static str {
        match self {
            Self::User => "transactions.user_uuid",
            Self::Product => "transactions.product_uuid",
            Self::Status => "transactions.status",
            Self::Quantity => "transactions.quantity",
            Self::CreatedAt => "transactions.created_at",
        }
    }

    fn kind(self) -> ValueKind {
        match self {
            Self::User | Self::Product => ValueKind::Uuid,
            Self::Status => ValueKind::Text,
            Self::Quantity => ValueKind::Integer,
            Self::CreatedAt => ValueKind::Timestamp,
        }
    }
}

/// Transaction log query.
pub type TransactionQuery = ListQuery<TransactionField>;
