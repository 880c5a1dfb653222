//! Transactions Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction as PgTransaction, postgres::PgRow,
    query_as,
};

use crate::{
    database::{from_db_int, to_db_int},
    domain::{
        products::models::ProductUuid,
        query::{Sort, SortDirection},
        transactions::models::{
            NewTransaction, Transaction, TransactionField, TransactionQuery, TransactionUuid,
        },
        users::models::UserUuid,
    },
};

const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const GET_TRANSACTION_SQL: &str = include_str!("sql/get_transaction.sql");
const LIST_USER_TRANSACTIONS_SQL: &str = include_str!("sql/list_user_transactions.sql");
const HISTORY_BY_USER_SQL: &str = include_str!("sql/history_by_user.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const COUNT_TRANSACTIONS_SQL: &str = include_str!("sql/count_transactions.sql");

const DEFAULT_SORT: Sort<TransactionField> = Sort {
    field: TransactionField::CreatedAt,
    direction: SortDirection::Desc,
};

/// A transaction joined with the current state of its product.
#[derive(Debug, Clone)]
pub(crate) struct HistoryRow {
    pub uuid: TransactionUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,
    pub created_at: Timestamp,
    pub product_name: String,
    pub product_image: String,
    pub product_price: u64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn insert_transaction(
        &self,
        tx: &mut PgTransaction<'_, Postgres>,
        transaction: &NewTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        query_as::<Postgres, Transaction>(INSERT_TRANSACTION_SQL)
            .bind(TransactionUuid::new())
            .bind(transaction.user_uuid)
            .bind(transaction.product_uuid)
            .bind(to_db_int(transaction.quantity, "quantity")?)
            .bind(transaction.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_transaction(
        &self,
        tx: &mut PgTransaction<'_, Postgres>,
        transaction: TransactionUuid,
    ) -> Result<Transaction, sqlx::Error> {
        query_as::<Postgres, Transaction>(GET_TRANSACTION_SQL)
            .bind(transaction)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_transactions(
        &self,
        tx: &mut PgTransaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        query_as::<Postgres, Transaction>(LIST_USER_TRANSACTIONS_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn history_by_user(
        &self,
        tx: &mut PgTransaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<HistoryRow>, sqlx::Error> {
        query_as::<Postgres, HistoryRow>(HISTORY_BY_USER_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut PgTransaction<'_, Postgres>,
        transaction_query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(LIST_TRANSACTIONS_SQL);

        transaction_query.push_filters(&mut builder);
        transaction_query.push_order_and_page(&mut builder, DEFAULT_SORT, "transactions.uuid");

        builder
            .build_query_as::<Transaction>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_transactions(
        &self,
        tx: &mut PgTransaction<'_, Postgres>,
        transaction_query: &TransactionQuery,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_TRANSACTIONS_SQL);

        transaction_query.push_filters(&mut builder);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        from_db_int(count, "count")
    }
}

impl<'r> FromRow<'r, PgRow> for Transaction {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity: from_db_int(row.try_get("quantity")?, "quantity")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for HistoryRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            quantity: from_db_int(row.try_get("quantity")?, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            product_name: row.try_get("product_name")?,
            product_image: row.try_get("product_image")?,
            product_price: from_db_int(row.try_get("product_price")?, "product_price")?,
        })
    }
}
