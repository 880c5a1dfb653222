//! Product Lists Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{from_db_int, to_db_int},
    domain::{
        product_lists::models::{
            ListKind, ProductList, ProductListItem, ProductListItemUuid, ProductListUuid,
        },
        products::models::{Product, ProductUuid},
        users::models::UserUuid,
    },
};

const GET_OR_CREATE_LIST_SQL: &str = include_str!("sql/get_or_create_list.sql");
const GET_LIST_BY_USER_SQL: &str = include_str!("sql/get_list_by_user.sql");
const GET_LIST_FOR_UPDATE_SQL: &str = include_str!("sql/get_list_for_update.sql");
const DELETE_LIST_SQL: &str = include_str!("sql/delete_list.sql");
const GET_LIST_ITEMS_SQL: &str = include_str!("sql/get_list_items.sql");
const INSERT_LIST_ITEM_SQL: &str = include_str!("sql/insert_list_item.sql");
const DELETE_LIST_ITEM_SQL: &str = include_str!("sql/delete_list_item.sql");
const COUNT_LIST_ITEMS_SQL: &str = include_str!("sql/count_list_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductListsRepository;

impl PgProductListsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_or_create_list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        kind: ListKind,
    ) -> Result<ProductList, sqlx::Error> {
        query_as::<Postgres, ProductList>(GET_OR_CREATE_LIST_SQL)
            .bind(ProductListUuid::new())
            .bind(user)
            .bind(kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_list_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        kind: ListKind,
    ) -> Result<ProductList, sqlx::Error> {
        query_as::<Postgres, ProductList>(GET_LIST_BY_USER_SQL)
            .bind(user)
            .bind(kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_list_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: ProductListUuid,
    ) -> Result<Option<ProductList>, sqlx::Error> {
        query_as::<Postgres, ProductList>(GET_LIST_FOR_UPDATE_SQL)
            .bind(list)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: ProductListUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LIST_SQL)
            .bind(list)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: ProductListUuid,
    ) -> Result<Vec<ProductListItem>, sqlx::Error> {
        query_as::<Postgres, ProductListItem>(GET_LIST_ITEMS_SQL)
            .bind(list)
            .fetch_all(&mut **tx)
            .await
    }

    /// Snapshot `product` into the list.
    ///
    /// Returns `None` when the product is already present.
    pub(crate) async fn insert_list_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: ProductListUuid,
        product: &Product,
    ) -> Result<Option<ProductListItem>, sqlx::Error> {
        query_as::<Postgres, ProductListItem>(INSERT_LIST_ITEM_SQL)
            .bind(ProductListItemUuid::new())
            .bind(list)
            .bind(product.uuid)
            .bind(&product.slug)
            .bind(&product.name)
            .bind(to_db_int(product.price, "product_price")?)
            .bind(&product.image)
            .bind(&product.category)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_list_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: ProductListUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductListItem>, sqlx::Error> {
        query_as::<Postgres, ProductListItem>(DELETE_LIST_ITEM_SQL)
            .bind(list)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn count_list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: ProductListUuid,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_LIST_ITEMS_SQL)
            .bind(list)
            .fetch_one(&mut **tx)
            .await?;

        from_db_int(count, "count")
    }
}

impl<'r> FromRow<'r, PgRow> for ProductList {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let kind: String = row.try_get("kind")?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            kind: kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductListItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_slug: row.try_get("product_slug")?,
            product_name: row.try_get("product_name")?,
            product_price: from_db_int(row.try_get("product_price")?, "product_price")?,
            product_image: row.try_get("product_image")?,
            product_category: row.try_get("product_category")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
