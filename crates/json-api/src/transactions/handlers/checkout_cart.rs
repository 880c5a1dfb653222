//! Cart Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use warunk_app::domain::checkout::models::CheckoutKind;

use crate::{
    carts,
    extensions::*,
    observability::{CheckoutOutcome, observe_checkout},
    state::State,
    transactions::{PurchaseResponse, checkout_status_error},
};

/// Cart Checkout Handler
///
/// Buys every line of the caller's cart. The receipt names the first line.
#[endpoint(
    tags("transactions"),
    summary = "Buy the Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart purchased"),
        (status_code = StatusCode::BAD_REQUEST, description = "Purchase rejected"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::GATEWAY_TIMEOUT, description = "Checkout timed out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "checkout.cart",
    skip(depot),
    fields(user_uuid = tracing::field::Empty, cart_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PurchaseResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));

    let cart = state
        .app
        .carts
        .get_cart_by_user(principal.user)
        .await
        .map_err(carts::into_status_error)?;

    span.record("cart_uuid", tracing::field::display(cart.uuid));

    let result = state
        .app
        .checkout
        .purchase_cart(principal.user, cart.uuid)
        .await;

    observe_checkout(CheckoutKind::Cart, CheckoutOutcome::of(&result));

    let receipt = result.map_err(checkout_status_error)?;

    tracing::info!(lines = cart.lines.len(), "purchased cart");

    Ok(Json(receipt.into()))
}
