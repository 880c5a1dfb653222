//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::carts::models::NewCartLine;

use crate::{
    carts::{CartResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    pub produk_id: Uuid,

    /// Quantity to add on top of any existing line for the product
    pub total: u64,
}

impl From<AddToCartRequest> for NewCartLine {
    fn from(request: AddToCartRequest) -> Self {
        NewCartLine {
            product: request.produk_id.into(),
            quantity: request.total,
        }
    }
}

/// Add To Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Add Product to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.add",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("product_uuid", tracing::field::display(request.produk_id));
    span.record("quantity", request.total);

    let cart = state
        .app
        .carts
        .upsert_line(principal.user, request.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_uuid = %cart.uuid, total = cart.total, "added product to cart");

    Ok(Json(cart.into()))
}
