//! Get Warunk Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::warunks::models::{Warunk, WarunkItem};

use crate::{extensions::*, state::State, warunks::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WarunkResponse {
    pub uuid: Uuid,

    /// Admin who opened or closed the warunk
    pub user_uuid: Uuid,

    /// `Buka` or `Tutup`
    pub status: String,

    pub items: Vec<WarunkItemResponse>,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WarunkItemResponse {
    pub produk_id: Uuid,
    pub slug: String,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub stock: u64,
}

impl From<WarunkItem> for WarunkItemResponse {
    fn from(item: WarunkItem) -> Self {
        WarunkItemResponse {
            produk_id: item.product_uuid.into(),
            slug: item.product_slug,
            name: item.product_name,
            price: item.product_price,
            category: item.product_category,
            stock: item.stock,
        }
    }
}

impl From<Warunk> for WarunkResponse {
    fn from(warunk: Warunk) -> Self {
        WarunkResponse {
            uuid: warunk.uuid.into(),
            user_uuid: warunk.user_uuid.into(),
            status: warunk.status.to_string(),
            items: warunk.items.into_iter().map(Into::into).collect(),
            created_at: warunk.created_at.to_string(),
        }
    }
}

/// Get Warunk Handler
#[endpoint(
    tags("warunks"),
    summary = "Get Warunk",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Warunk found"),
        (status_code = StatusCode::NOT_FOUND, description = "Warunk not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    warunk: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<WarunkResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let warunk = state
        .app
        .warunks
        .get_warunk(warunk.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(warunk.into()))
}
