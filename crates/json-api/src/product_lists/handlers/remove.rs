//! Remove From Product List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::product_lists::models::{ListKind, RemovedListItem};

use crate::{extensions::*, product_lists::into_status_error, state::State};

/// Remove From Product List Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveFromListRequest {
    /// The favorite or wishlist UUID
    pub list_id: Uuid,
    pub produk_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemovedListItemResponse {
    pub list_id: Uuid,
    pub produk_name: String,

    /// Whether the list was deleted because it became empty
    pub list_deleted: bool,
}

impl From<RemovedListItem> for RemovedListItemResponse {
    fn from(removed: RemovedListItem) -> Self {
        RemovedListItemResponse {
            list_id: removed.list.into(),
            produk_name: removed.product_name,
            list_deleted: removed.list_deleted,
        }
    }
}

/// Remove From Product List Handler
#[endpoint(
    tags("lists"),
    summary = "Remove Product from Favorites or Wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "List or product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "lists.remove",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        kind = tracing::field::Empty,
        list_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveFromListRequest>,
    depot: &mut Depot,
) -> Result<Json<RemovedListItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let kind = *depot.obtain_or_500::<ListKind>()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("kind", kind.as_str());
    span.record("list_uuid", tracing::field::display(request.list_id));
    span.record("product_uuid", tracing::field::display(request.produk_id));

    let removed = state
        .app
        .product_lists
        .remove_product(
            principal.user,
            kind,
            request.list_id.into(),
            request.produk_id.into(),
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        list_uuid = %removed.list,
        list_deleted = removed.list_deleted,
        "removed product from list"
    );

    Ok(Json(removed.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use warunk_app::domain::{
        product_lists::{
            MockProductListsService, ProductListsServiceError, models::ProductListUuid,
        },
        products::models::ProductUuid,
    };

    use crate::{
        product_lists::favorite,
        test_helpers::{BUYER, Mocks, TEST_USER_UUID},
    };

    use super::*;

    fn make_service(product_lists: MockProductListsService) -> Service {
        Mocks {
            product_lists,
            ..Mocks::default()
        }
        .service_as(
            BUYER,
            Router::with_path("favorite/deleteproduct")
                .hoop(favorite)
                .post(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_from_favorite_success() -> TestResult {
        let list = ProductListUuid::new();
        let product = ProductUuid::new();

        let mut product_lists = MockProductListsService::new();

        product_lists
            .expect_remove_product()
            .once()
            .withf(move |user, kind, l, p| {
                *user == TEST_USER_UUID
                    && *kind == ListKind::Favorite
                    && *l == list
                    && *p == product
            })
            .return_once(move |_, _, _, _| {
                Ok(RemovedListItem {
                    list,
                    product_name: "Kopi Susu".to_string(),
                    list_deleted: false,
                })
            });

        let mut res = TestClient::post("http://example.com/favorite/deleteproduct")
            .json(&json!({ "list_id": list.into_uuid(), "produk_id": product.into_uuid() }))
            .send(&make_service(product_lists))
            .await;

        let body: RemovedListItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.produk_name, "Kopi Susu");
        assert!(!body.list_deleted, "expected list to remain");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_absent_product_returns_404() -> TestResult {
        let mut product_lists = MockProductListsService::new();

        product_lists
            .expect_remove_product()
            .once()
            .return_once(|_, kind, _, _| Err(ProductListsServiceError::NotInList(kind)));

        let res = TestClient::post("http://example.com/favorite/deleteproduct")
            .json(&json!({
                "list_id": ProductListUuid::new().into_uuid(),
                "produk_id": ProductUuid::new().into_uuid(),
            }))
            .send(&make_service(product_lists))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
