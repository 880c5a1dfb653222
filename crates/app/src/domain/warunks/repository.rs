//! Warunks Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{from_db_int, to_db_int},
    domain::{
        products::models::Product,
        users::models::UserUuid,
        warunks::models::{Warunk, WarunkItem, WarunkItemUuid, WarunkStatus, WarunkUuid},
    },
};

const LOCK_WARUNK_STATUS_SQL: &str = include_str!("sql/lock_warunk_status.sql");
const LATEST_WARUNK_BY_STATUS_SQL: &str = include_str!("sql/latest_warunk_by_status.sql");
const INSERT_WARUNK_SQL: &str = include_str!("sql/insert_warunk.sql");
const GET_WARUNK_SQL: &str = include_str!("sql/get_warunk.sql");
const INSERT_WARUNK_ITEM_SQL: &str = include_str!("sql/insert_warunk_item.sql");
const GET_WARUNK_ITEMS_SQL: &str = include_str!("sql/get_warunk_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgWarunksRepository;

impl PgWarunksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Serialize writers of the same status until the transaction ends.
    pub(crate) async fn lock_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: WarunkStatus,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_WARUNK_STATUS_SQL)
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn latest_warunk_by_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        status: WarunkStatus,
    ) -> Result<Option<Warunk>, sqlx::Error> {
        query_as::<Postgres, Warunk>(LATEST_WARUNK_BY_STATUS_SQL)
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_warunk(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        status: WarunkStatus,
    ) -> Result<Warunk, sqlx::Error> {
        query_as::<Postgres, Warunk>(INSERT_WARUNK_SQL)
            .bind(WarunkUuid::new())
            .bind(user)
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_warunk(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        warunk: WarunkUuid,
    ) -> Result<Warunk, sqlx::Error> {
        query_as::<Postgres, Warunk>(GET_WARUNK_SQL)
            .bind(warunk)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn insert_warunk_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        warunk: WarunkUuid,
        product: &Product,
        stock: u64,
    ) -> Result<WarunkItem, sqlx::Error> {
        query_as::<Postgres, WarunkItem>(INSERT_WARUNK_ITEM_SQL)
            .bind(WarunkItemUuid::new())
            .bind(warunk)
            .bind(product.uuid)
            .bind(&product.slug)
            .bind(&product.name)
            .bind(to_db_int(product.price, "product_price")?)
            .bind(&product.category)
            .bind(to_db_int(stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_warunk_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        warunk: WarunkUuid,
    ) -> Result<Vec<WarunkItem>, sqlx::Error> {
        query_as::<Postgres, WarunkItem>(GET_WARUNK_ITEMS_SQL)
            .bind(warunk)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Warunk {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WarunkItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_slug: row.try_get("product_slug")?,
            product_name: row.try_get("product_name")?,
            product_price: from_db_int(row.try_get("product_price")?, "product_price")?,
            product_category: row.try_get("product_category")?,
            stock: from_db_int(row.try_get("stock")?, "stock")?,
        })
    }
}
