//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar,
};

use crate::{
    database::{from_db_int, to_db_int},
    domain::{
        products::models::{Product, ProductField, ProductQuery, ProductUuid},
        query::{Sort, SortDirection},
    },
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_INCLUDING_DELETED_SQL: &str =
    include_str!("sql/get_product_including_deleted.sql");
const GET_PRODUCT_FOR_UPDATE_SQL: &str = include_str!("sql/get_product_for_update.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const SLUG_TAKEN_SQL: &str = include_str!("sql/slug_taken.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const SOFT_DELETE_PRODUCT_SQL: &str = include_str!("sql/soft_delete_product.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const SET_STOCK_SQL: &str = include_str!("sql/set_stock.sql");

const DEFAULT_SORT: Sort<ProductField> = Sort {
    field: ProductField::CreatedAt,
    direction: SortDirection::Desc,
};

/// Every column of a product row that callers write.
#[derive(Debug, Clone)]
pub(crate) struct ProductRecord<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub detail: &'a str,
    pub price: u64,
    pub stock: u64,
    pub category: &'a str,
    pub image: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        record: &ProductRecord<'_>,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product)
            .bind(record.slug)
            .bind(record.name)
            .bind(record.detail)
            .bind(to_db_int(record.price, "price")?)
            .bind(to_db_int(record.stock, "stock")?)
            .bind(record.category)
            .bind(record.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    /// Used to render purchase history for products that have since been deleted.
    pub(crate) async fn get_product_including_deleted(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_INCLUDING_DELETED_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    /// Load an active product and lock its row until the transaction ends.
    pub(crate) async fn get_product_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_FOR_UPDATE_SQL)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether any product other than `except`, deleted or not, uses `slug`.
    pub(crate) async fn slug_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
        except: Option<ProductUuid>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(SLUG_TAKEN_SQL)
            .bind(slug)
            .bind(except)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_query: &ProductQuery,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(LIST_PRODUCTS_SQL);

        product_query.push_filters(&mut builder);
        product_query.push_order_and_page(&mut builder, DEFAULT_SORT, "products.uuid");

        builder
            .build_query_as::<Product>()
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_query: &ProductQuery,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_PRODUCTS_SQL);

        product_query.push_filters(&mut builder);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        record: &ProductRecord<'_>,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product)
            .bind(record.slug)
            .bind(record.name)
            .bind(record.detail)
            .bind(to_db_int(record.price, "price")?)
            .bind(to_db_int(record.stock, "stock")?)
            .bind(record.category)
            .bind(record.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn soft_delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SOFT_DELETE_PRODUCT_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Subtract `quantity` from the stock unless that would make it negative.
    ///
    /// Returns `None` when the product is missing or has less than `quantity` in stock.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(DECREMENT_STOCK_SQL)
            .bind(product)
            .bind(to_db_int(quantity, "stock")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn set_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        stock: u64,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(SET_STOCK_SQL)
            .bind(product)
            .bind(to_db_int(stock, "stock")?)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            detail: row.try_get("detail")?,
            price: from_db_int(row.try_get("price")?, "price")?,
            stock: from_db_int(row.try_get("stock")?, "stock")?,
            category: row.try_get("category")?,
            image: row.try_get("image")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
