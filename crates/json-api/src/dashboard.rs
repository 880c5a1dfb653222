//! Dashboard Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use warunk_app::domain::products::models::ProductQuery;

use crate::{
    balances,
    extensions::*,
    products::{self, index::ProductsResponse},
    profile::UserResponse,
    state::State,
    users,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardResponse {
    /// Current balance
    pub saldo: u64,

    pub profil: UserResponse,

    /// First page of the catalog
    pub produk: ProductsResponse,
}

/// Dashboard Handler
///
/// Balance, profile and the first catalog page in one response.
#[endpoint(
    tags("dashboard"),
    summary = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Dashboard"),
        (status_code = StatusCode::NOT_FOUND, description = "User or balance not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let balance = state
        .app
        .balances
        .get_balance(principal.user)
        .await
        .map_err(balances::into_status_error)?;

    let user = state
        .app
        .users
        .get_user(principal.user)
        .await
        .map_err(users::into_status_error)?;

    let catalog = state
        .app
        .products
        .list_products(ProductQuery::default())
        .await
        .map_err(products::into_status_error)?;

    Ok(Json(DashboardResponse {
        saldo: balance.amount,
        profil: user.into(),
        produk: catalog.into(),
    }))
}
