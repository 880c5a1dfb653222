//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::from_db_int,
    domain::{
        carts::models::{Cart, CartUuid},
        users::models::UserUuid,
    },
};

const GET_OR_CREATE_CART_SQL: &str = include_str!("../sql/get_or_create_cart.sql");
const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const GET_CART_FOR_UPDATE_SQL: &str = include_str!("../sql/get_cart_for_update.sql");
const GET_CART_BY_USER_SQL: &str = include_str!("../sql/get_cart_by_user.sql");
const ADJUST_CART_TOTAL_SQL: &str = include_str!("../sql/adjust_cart_total.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Return the user's cart, creating an empty one if they have none.
    pub(crate) async fn get_or_create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_OR_CREATE_CART_SQL)
            .bind(CartUuid::new())
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(cart)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_FOR_UPDATE_SQL)
            .bind(cart)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_cart_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_BY_USER_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn adjust_cart_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        delta: i64,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(ADJUST_CART_TOTAL_SQL)
            .bind(cart)
            .bind(delta)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            total: from_db_int(row.try_get("total")?, "total")?,
            lines: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
