//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::carts::models::{Cart, CartLine};

use crate::{carts::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub uuid: Uuid,

    /// Sum of snapshot price times quantity over every line
    pub total: u64,

    pub lines: Vec<CartLineResponse>,
    pub created_at: String,
    pub updated_at: String,
}

/// A cart line with the product as it looked when it was added.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub slug: String,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub category: String,
    pub quantity: u64,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            product_uuid: line.product_uuid.into(),
            slug: line.product_slug,
            name: line.product_name,
            price: line.product_price,
            image: line.product_image,
            category: line.product_category,
            quantity: line.quantity,
        }
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            uuid: cart.uuid.into(),
            total: cart.total,
            lines: cart.lines.into_iter().map(Into::into).collect(),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the caller's cart.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart_by_user(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use warunk_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            models::{CartLineUuid, CartUuid},
        },
        products::models::ProductUuid,
        users::models::UserUuid,
    };

    use crate::test_helpers::{BUYER, Mocks, TEST_USER_UUID};

    use super::*;

    pub(crate) fn make_cart(uuid: CartUuid, user: UserUuid, product: ProductUuid) -> Cart {
        Cart {
            uuid,
            user_uuid: user,
            total: 30_000,
            lines: vec![CartLine {
                uuid: CartLineUuid::new(),
                product_uuid: product,
                product_slug: "kopi-susu".to_string(),
                product_name: "Kopi Susu".to_string(),
                product_price: 15_000,
                product_image: String::new(),
                product_category: "minuman".to_string(),
                quantity: 2,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn make_service(carts: MockCartsService) -> Service {
        Mocks {
            carts,
            ..Mocks::default()
        }
        .service_as(BUYER, Router::with_path("keranjang").get(handler))
    }

    #[tokio::test]
    async fn test_get_cart_success() -> TestResult {
        let uuid = CartUuid::new();
        let product = ProductUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_by_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |user| Ok(make_cart(uuid, user, product)));

        carts.expect_get_cart().never();

        let mut res = TestClient::get("http://example.com/keranjang")
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.total, 30_000);
        assert_eq!(
            body.lines.first().map(|line| (line.product_uuid, line.quantity)),
            Some((product.into_uuid(), 2))
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart_by_user()
            .once()
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get("http://example.com/keranjang")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
