//! Balance Models

use jiff::Timestamp;

use crate::{domain::users::models::UserUuid, uuids::TypedUuid};

/// Balance UUID
pub type BalanceUuid = TypedUuid<Balance>;

/// Balance Model
///
/// One per user. `amount` is in the smallest currency unit and never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub uuid: BalanceUuid,
    pub user_uuid: UserUuid,
    pub amount: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an admin top-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUpReceipt {
    pub name: String,
    /// Amount added by this top-up.
    pub amount: u64,
    /// Balance after the top-up.
    pub balance: u64,
    pub message: String,
}
