//! Get Product By Slug Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    products::{ProductResponse, into_status_error},
    state::State,
};

/// Get Product By Slug Handler
#[endpoint(tags("products"), summary = "Get Product by Slug")]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product_by_slug(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}
