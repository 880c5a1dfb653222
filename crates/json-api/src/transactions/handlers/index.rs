//! Transaction Log Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use warunk_app::domain::{
    query::{DEFAULT_PAGE_SIZE, Filter, FilterOp, FilterValue, Page, PageRequest},
    transactions::models::{Transaction, TransactionField, TransactionQuery},
};

use crate::{extensions::*, state::State, transactions::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub product_uuid: Uuid,
    pub quantity: u64,
    pub status: String,
    pub created_at: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        TransactionResponse {
            uuid: transaction.uuid.into(),
            user_uuid: transaction.user_uuid.into(),
            product_uuid: transaction.product_uuid.into(),
            quantity: transaction.quantity,
            status: transaction.status.to_string(),
            created_at: transaction.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl From<Page<Transaction>> for TransactionsResponse {
    fn from(page: Page<Transaction>) -> Self {
        TransactionsResponse {
            transactions: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page.number(),
            per_page: page.page.size(),
        }
    }
}

/// Transaction Log Handler
///
/// Admin view of every recorded purchase, newest first.
#[endpoint(
    tags("transactions"),
    summary = "List Transactions",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "One page of transactions"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid paging"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    per_page: QueryParam<u32, false>,
    user: QueryParam<Uuid, false>,
    product: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<TransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = PageRequest::new(
        per_page.into_inner().unwrap_or(DEFAULT_PAGE_SIZE),
        page.into_inner().unwrap_or(1),
    )
    .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let filters = [
        (TransactionField::User, user.into_inner()),
        (TransactionField::Product, product.into_inner()),
    ]
    .into_iter()
    .filter_map(|(field, value)| {
        value.map(|uuid| Filter::new(field, FilterOp::Eq, FilterValue::Uuid(uuid)))
    })
    .collect();

    let transactions = state
        .app
        .transactions
        .list_transactions(TransactionQuery {
            filters,
            sort: None,
            page,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(transactions.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use warunk_app::domain::{
        products::models::ProductUuid,
        transactions::{
            MockTransactionsService,
            models::{TransactionStatus, TransactionUuid},
        },
    };

    use crate::test_helpers::{ADMIN, Mocks, TEST_USER_UUID};

    use super::*;

    fn make_service(transactions: MockTransactionsService) -> Service {
        Mocks {
            transactions,
            ..Mocks::default()
        }
        .service_as(ADMIN, Router::with_path("admin/transaksi").get(handler))
    }

    #[tokio::test]
    async fn test_filters_by_user_and_pages() -> TestResult {
        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_list_transactions()
            .once()
            .withf(|query| {
                query.page.size() == 5
                    && query.page.number() == 2
                    && query.filters
                        == vec![Filter::new(
                            TransactionField::User,
                            FilterOp::Eq,
                            FilterValue::Uuid(TEST_USER_UUID.into_uuid()),
                        )]
            })
            .return_once(|query| {
                Ok(Page {
                    items: vec![Transaction {
                        uuid: TransactionUuid::new(),
                        user_uuid: TEST_USER_UUID,
                        product_uuid: ProductUuid::new(),
                        quantity: 1,
                        status: TransactionStatus::Succeeded,
                        created_at: Timestamp::UNIX_EPOCH,
                    }],
                    total: 6,
                    page: query.page,
                })
            });

        let url = format!(
            "http://example.com/admin/transaksi?page=2&per_page=5&user={}",
            TEST_USER_UUID
        );

        let mut res = TestClient::get(url).send(&make_service(transactions)).await;

        let body: TransactionsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.total, 6);
        assert_eq!(body.page, 2);
        assert_eq!(body.transactions.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_page_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/admin/transaksi?per_page=1000")
            .send(&make_service(MockTransactionsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
