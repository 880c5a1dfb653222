//! Purchase History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::transactions::models::TransactionHistoryEntry;

use crate::{extensions::*, state::State, transactions::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HistoryEntryResponse {
    pub transaksi_id: Uuid,
    pub produk_id: Uuid,
    pub produk_name: String,
    pub image: String,

    /// Current unit price of the product
    pub price: u64,

    pub total: u64,
    pub total_price: u64,
    pub created_at: String,
}

impl From<TransactionHistoryEntry> for HistoryEntryResponse {
    fn from(entry: TransactionHistoryEntry) -> Self {
        HistoryEntryResponse {
            transaksi_id: entry.transaction_uuid.into(),
            produk_id: entry.product_uuid.into(),
            produk_name: entry.product_name,
            image: entry.image,
            price: entry.unit_price,
            total: entry.quantity,
            total_price: entry.total_price,
            created_at: entry.purchased_at.to_string(),
        }
    }
}

/// Purchase History Handler
#[endpoint(
    tags("transactions"),
    summary = "Purchase History",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Purchase history, newest first"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<HistoryEntryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let history = state
        .app
        .transactions
        .history(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(history.into_iter().map(Into::into).collect()))
}
