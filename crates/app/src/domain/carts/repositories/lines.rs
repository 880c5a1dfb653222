//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    database::{from_db_int, to_db_int},
    domain::{
        carts::models::{CartLine, CartLineUuid, CartUuid},
        products::models::{Product, ProductUuid},
    },
};

const GET_CART_LINES_SQL: &str = include_str!("../sql/get_cart_lines.sql");
const UPSERT_CART_LINE_SQL: &str = include_str!("../sql/upsert_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("../sql/delete_cart_line.sql");
const COUNT_CART_LINES_SQL: &str = include_str!("../sql/count_cart_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lines in the order they were first added.
    pub(crate) async fn get_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(GET_CART_LINES_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await
    }

    /// Add `quantity` of `product` to the cart. An existing line for the product is
    /// incremented instead of duplicated.
    pub(crate) async fn upsert_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: &Product,
        quantity: u64,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Postgres, CartLine>(UPSERT_CART_LINE_SQL)
            .bind(CartLineUuid::new())
            .bind(cart)
            .bind(product.uuid)
            .bind(&product.slug)
            .bind(&product.name)
            .bind(to_db_int(product.price, "product_price")?)
            .bind(&product.image)
            .bind(&product.category)
            .bind(to_db_int(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLine>, sqlx::Error> {
        query_as::<Postgres, CartLine>(DELETE_CART_LINE_SQL)
            .bind(cart)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn count_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let count = query_scalar::<Postgres, i64>(COUNT_CART_LINES_SQL)
            .bind(cart)
            .fetch_one(&mut **tx)
            .await?;

        from_db_int(count, "count")
    }
}

impl<'r> FromRow<'r, PgRow> for CartLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            product_slug: row.try_get("product_slug")?,
            product_name: row.try_get("product_name")?,
            product_price: from_db_int(row.try_get("product_price")?, "product_price")?,
            product_image: row.try_get("product_image")?,
            product_category: row.try_get("product_category")?,
            quantity: from_db_int(row.try_get("quantity")?, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
