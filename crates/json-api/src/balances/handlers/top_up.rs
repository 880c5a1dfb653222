//! Top Up Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use warunk_app::domain::balances::models::TopUpReceipt;

use crate::{balances::into_status_error, extensions::*, state::State};

/// Top Up Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopUpRequest {
    /// Email of the account to credit
    pub email: String,
    pub amount: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TopUpResponse {
    pub name: String,

    /// Amount added by this top-up
    pub amount: u64,

    /// Balance after the top-up
    pub balance: u64,

    pub message: String,
}

impl From<TopUpReceipt> for TopUpResponse {
    fn from(receipt: TopUpReceipt) -> Self {
        TopUpResponse {
            name: receipt.name,
            amount: receipt.amount,
            balance: receipt.balance,
            message: receipt.message,
        }
    }
}

/// Top Up Handler
#[endpoint(
    tags("balances"),
    summary = "Top Up a Balance",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Balance credited"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid amount"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::NOT_FOUND, description = "Email not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "balances.top_up",
    skip(json, depot),
    fields(admin_uuid = tracing::field::Empty, amount = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<TopUpRequest>,
    depot: &mut Depot,
) -> Result<Json<TopUpResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(principal.user));
    span.record("amount", request.amount);

    let receipt = state
        .app
        .balances
        .top_up(request.email.trim(), request.amount)
        .await
        .map_err(into_status_error)?;

    Ok(Json(receipt.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use warunk_app::domain::balances::{BalancesServiceError, MockBalancesService};

    use crate::test_helpers::{ADMIN, Mocks};

    use super::*;

    fn make_service(balances: MockBalancesService) -> Service {
        Mocks {
            balances,
            ..Mocks::default()
        }
        .service_as(ADMIN, Router::with_path("topup").post(handler))
    }

    #[tokio::test]
    async fn test_top_up_reports_amount_and_balance() -> TestResult {
        let mut balances = MockBalancesService::new();

        balances
            .expect_top_up()
            .once()
            .withf(|email, amount| email == "budi@example.com" && *amount == 25_000)
            .return_once(|_, amount| {
                Ok(TopUpReceipt {
                    name: "Budi Santoso".to_string(),
                    amount,
                    balance: 75_000,
                    message: "Top up berhasil".to_string(),
                })
            });

        let mut res = TestClient::post("http://example.com/topup")
            .json(&json!({ "email": " budi@example.com ", "amount": 25_000 }))
            .send(&make_service(balances))
            .await;

        let body: TopUpResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "Budi Santoso");
        assert_eq!(body.amount, 25_000);
        assert_eq!(body.balance, 75_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_top_up_unknown_email_returns_404() -> TestResult {
        let mut balances = MockBalancesService::new();

        balances
            .expect_top_up()
            .once()
            .return_once(|_, _| Err(BalancesServiceError::EmailNotFound));

        let res = TestClient::post("http://example.com/topup")
            .json(&json!({ "email": "nobody@example.com", "amount": 1 }))
            .send(&make_service(balances))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_top_up_zero_returns_400() -> TestResult {
        let mut balances = MockBalancesService::new();

        balances
            .expect_top_up()
            .once()
            .return_once(|_, _| Err(BalancesServiceError::ZeroAmount));

        let res = TestClient::post("http://example.com/topup")
            .json(&json!({ "email": "budi@example.com", "amount": 0 }))
            .send(&make_service(balances))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
