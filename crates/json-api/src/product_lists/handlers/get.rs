//! Get Product List Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::product_lists::models::{ListKind, ProductList, ProductListItem};

use crate::{extensions::*, product_lists::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductListResponse {
    pub uuid: Uuid,

    /// `favorite` or `wishlist`
    pub kind: String,

    pub items: Vec<ProductListItemResponse>,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductListItemResponse {
    pub product_uuid: Uuid,
    pub slug: String,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub category: String,
    pub added_at: String,
}

impl From<ProductListItem> for ProductListItemResponse {
    fn from(item: ProductListItem) -> Self {
        ProductListItemResponse {
            product_uuid: item.product_uuid.into(),
            slug: item.product_slug,
            name: item.product_name,
            price: item.product_price,
            image: item.product_image,
            category: item.product_category,
            added_at: item.created_at.to_string(),
        }
    }
}

impl From<ProductList> for ProductListResponse {
    fn from(list: ProductList) -> Self {
        ProductListResponse {
            uuid: list.uuid.into(),
            kind: list.kind.to_string(),
            items: list.items.into_iter().map(Into::into).collect(),
            updated_at: list.updated_at.to_string(),
        }
    }
}

/// Get Product List Handler
#[endpoint(
    tags("lists"),
    summary = "Get Favorites or Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "List found"),
        (status_code = StatusCode::NOT_FOUND, description = "List not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductListResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let kind = *depot.obtain_or_500::<ListKind>()?;

    let list = state
        .app
        .product_lists
        .get_list(principal.user, kind)
        .await
        .map_err(into_status_error)?;

    Ok(Json(list.into()))
}
