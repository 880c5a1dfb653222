//! Add To Product List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::product_lists::models::ListKind;

use crate::{
    extensions::*,
    product_lists::{ProductListResponse, into_status_error},
    state::State,
};

/// Add To Product List Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToListRequest {
    pub produk_id: Uuid,
}

/// Add To Product List Handler
#[endpoint(
    tags("lists"),
    summary = "Add Product to Favorites or Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product added"),
        (status_code = StatusCode::CONFLICT, description = "Product already in list"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "lists.add",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        kind = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddToListRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let kind = *depot.obtain_or_500::<ListKind>()?;
    let product = json.into_inner().produk_id;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("kind", kind.as_str());
    span.record("product_uuid", tracing::field::display(product));

    let list = state
        .app
        .product_lists
        .add_product(principal.user, kind, product.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(list_uuid = %list.uuid, %kind, "added product to list");

    Ok(Json(list.into()))
}
