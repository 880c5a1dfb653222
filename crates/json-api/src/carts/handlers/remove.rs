//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::carts::models::RemovedLine;

use crate::{carts::into_status_error, extensions::*, state::State};

/// Remove From Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveFromCartRequest {
    pub keranjang_id: Uuid,
    pub produk_id: Uuid,
}

/// Remove From Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemovedLineResponse {
    pub keranjang_id: Uuid,

    /// Name of the removed product
    pub produk_name: String,

    /// Whether the cart was deleted because it became empty
    pub keranjang_deleted: bool,
}

impl From<RemovedLine> for RemovedLineResponse {
    fn from(removed: RemovedLine) -> Self {
        RemovedLineResponse {
            keranjang_id: removed.cart.into(),
            produk_name: removed.product_name,
            keranjang_deleted: removed.cart_deleted,
        }
    }
}

/// Remove From Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Product from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove",
    skip(json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        cart_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveFromCartRequest>,
    depot: &mut Depot,
) -> Result<Json<RemovedLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("cart_uuid", tracing::field::display(request.keranjang_id));
    span.record("product_uuid", tracing::field::display(request.produk_id));

    let removed = state
        .app
        .carts
        .remove_line(
            principal.user,
            request.keranjang_id.into(),
            request.produk_id.into(),
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        cart_uuid = %removed.cart,
        cart_deleted = removed.cart_deleted,
        "removed product from cart"
    );

    Ok(Json(removed.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use warunk_app::domain::{
        carts::{CartsServiceError, MockCartsService, models::CartUuid},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{BUYER, Mocks, TEST_USER_UUID};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        Mocks {
            carts,
            ..Mocks::default()
        }
        .service_as(BUYER, Router::with_path("keranjang/deleteproduct").post(handler))
    }

    #[tokio::test]
    async fn test_remove_last_line_reports_deleted_cart() -> TestResult {
        let cart = CartUuid::new();
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_line()
            .once()
            .withf(move |user, c, p| *user == TEST_USER_UUID && *c == cart && *p == product)
            .return_once(move |_, _, _| {
                Ok(RemovedLine {
                    cart,
                    product_name: "Kopi Susu".to_string(),
                    cart_deleted: true,
                })
            });

        let mut res = TestClient::post("http://example.com/keranjang/deleteproduct")
            .json(&json!({ "keranjang_id": cart.into_uuid(), "produk_id": product.into_uuid() }))
            .send(&make_service(carts))
            .await;

        let body: RemovedLineResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.produk_name, "Kopi Susu");
        assert!(body.keranjang_deleted, "expected cart to be deleted");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_from_someone_elses_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_line()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/keranjang/deleteproduct")
            .json(&json!({
                "keranjang_id": CartUuid::new().into_uuid(),
                "produk_id": ProductUuid::new().into_uuid(),
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
