//! Open Warunk Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::warunks::models::{NewWarunk, StockTarget, WarunkStatus};

use crate::{
    extensions::*,
    state::State,
    warunks::{WarunkResponse, into_status_error},
};

/// Open Warunk Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OpenWarunkRequest {
    /// `Buka` opens the warunk and sets live stock, `Tutup` only records a snapshot
    pub status: String,

    pub items: Vec<StockTargetRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockTargetRequest {
    pub produk_id: Uuid,
    pub stock: u64,
}

impl TryFrom<OpenWarunkRequest> for NewWarunk {
    type Error = StatusError;

    fn try_from(request: OpenWarunkRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .parse::<WarunkStatus>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

        Ok(NewWarunk {
            status,
            items: request
                .items
                .into_iter()
                .map(|item| StockTarget {
                    product: item.produk_id.into(),
                    stock: item.stock,
                })
                .collect(),
        })
    }
}

/// Open Warunk Handler
#[endpoint(
    tags("warunks"),
    summary = "Open or Close the Warunk",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Warunk recorded"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::CONFLICT, description = "Already recorded today"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "warunks.open",
    skip(json, depot, res),
    fields(
        admin_uuid = tracing::field::Empty,
        status = tracing::field::Empty,
        items = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<OpenWarunkRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<WarunkResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let new_warunk = NewWarunk::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(principal.user));
    span.record("status", new_warunk.status.as_str());
    span.record("items", new_warunk.items.len());

    let warunk = state
        .app
        .warunks
        .open_warunk(principal.user, new_warunk)
        .await
        .map_err(into_status_error)?;

    tracing::info!(warunk_uuid = %warunk.uuid, "recorded warunk");

    res.add_header(LOCATION, format!("/warunk/{}", warunk.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(warunk.into()))
}
