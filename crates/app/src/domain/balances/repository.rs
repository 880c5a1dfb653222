//! Balances Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{from_db_int, to_db_int},
    domain::{
        balances::models::{Balance, BalanceUuid},
        users::models::UserUuid,
    },
};

const CREATE_BALANCE_SQL: &str = include_str!("sql/create_balance.sql");
const GET_BALANCE_BY_USER_SQL: &str = include_str!("sql/get_balance_by_user.sql");
const ADJUST_BALANCE_SQL: &str = include_str!("sql/adjust_balance.sql");
const BALANCE_EXISTS_SQL: &str = include_str!("sql/balance_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBalancesRepository;

impl PgBalancesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        amount: u64,
    ) -> Result<Balance, sqlx::Error> {
        query_as::<Postgres, Balance>(CREATE_BALANCE_SQL)
            .bind(BalanceUuid::new())
            .bind(user)
            .bind(to_db_int(amount, "amount")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_balance_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Balance, sqlx::Error> {
        query_as::<Postgres, Balance>(GET_BALANCE_BY_USER_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    /// Add `delta` to the user's balance unless the result would be negative.
    ///
    /// Returns `None` when no row was updated: either the balance does not exist or
    /// the debit would overdraw it.
    pub(crate) async fn adjust_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        delta: i64,
    ) -> Result<Option<Balance>, sqlx::Error> {
        query_as::<Postgres, Balance>(ADJUST_BALANCE_SQL)
            .bind(user)
            .bind(delta)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn balance_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(BALANCE_EXISTS_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Balance {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let amount: i64 = row.try_get("amount")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            amount: from_db_int(amount, "amount")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
