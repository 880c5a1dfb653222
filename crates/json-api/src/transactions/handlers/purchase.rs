//! Purchase Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::checkout::models::{CheckoutKind, PurchaseReceipt};

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, observe_checkout},
    state::State,
    transactions::checkout_status_error,
};

/// Purchase Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseRequest {
    pub produk_id: Uuid,

    /// Quantity to buy
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    /// Buyer's display name
    pub name: String,
    pub produk_name: String,
    pub total: u64,
}

impl From<PurchaseReceipt> for PurchaseResponse {
    fn from(receipt: PurchaseReceipt) -> Self {
        PurchaseResponse {
            name: receipt.buyer_name,
            produk_name: receipt.product_name,
            total: receipt.quantity,
        }
    }
}

/// Purchase Product Handler
#[endpoint(
    tags("transactions"),
    summary = "Buy a Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Purchase completed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Purchase rejected"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Checkout timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.single",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<PurchaseRequest>,
    depot: &mut Depot,
) -> Result<Json<PurchaseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("product_uuid", tracing::field::display(request.produk_id));
    span.record("quantity", request.total);

    let result = state
        .app
        .checkout
        .purchase_one(principal.user, request.produk_id.into(), request.total)
        .await;

    observe_checkout(CheckoutKind::Single, CheckoutOutcome::of(&result));

    let receipt = result.map_err(checkout_status_error)?;

    tracing::info!(quantity = receipt.quantity, "purchased product");

    Ok(Json(receipt.into()))
}
