//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartUuid, NewCartLine, RemovedLine},
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        products::{models::ProductUuid, repository::PgProductsRepository},
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    lines_repository: PgCartLinesRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            lines_repository: PgCartLinesRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut cart: Cart,
    ) -> Result<Cart, CartsServiceError> {
        cart.lines = self.lines_repository.get_cart_lines(tx, cart.uuid).await?;

        Ok(cart)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_cart(&mut tx, cart).await?;
        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn get_cart_by_user(&self, user: UserUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.carts_repository.get_cart_by_user(&mut tx, user).await?;
        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn upsert_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<Cart, CartsServiceError> {
        if line.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let delta = i64::try_from(line.quantity)?;

        let mut tx = self.db.begin().await?;

        let product = match self
            .products_repository
            .get_product(&mut tx, line.product)
            .await
        {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => return Err(CartsServiceError::ProductNotFound),
            Err(source) => return Err(source.into()),
        };

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, user)
            .await?;

        self.lines_repository
            .upsert_cart_line(&mut tx, cart.uuid, &product, line.quantity)
            .await?;

        let cart = self
            .carts_repository
            .adjust_cart_total(&mut tx, cart.uuid, delta)
            .await?;

        let cart = self.with_lines(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_line(
        &self,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<RemovedLine, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .carts_repository
            .get_cart_for_update(&mut tx, cart)
            .await?
            .filter(|existing| existing.user_uuid == user)
            .ok_or(CartsServiceError::NotFound)?;

        let removed = self
            .lines_repository
            .delete_cart_line(&mut tx, existing.uuid, product)
            .await?
            .ok_or(CartsServiceError::ProductNotInCart)?;

        let remaining = self
            .lines_repository
            .count_cart_lines(&mut tx, existing.uuid)
            .await?;

        if remaining == 0 {
            self.carts_repository
                .delete_cart(&mut tx, existing.uuid)
                .await?;
        } else {
            self.carts_repository
                .adjust_cart_total(&mut tx, existing.uuid, -i64::try_from(removed.quantity)?)
                .await?;
        }

        tx.commit().await?;

        Ok(RemovedLine {
            cart: existing.uuid,
            product_name: removed.product_name,
            cart_deleted: remaining == 0,
        })
    }

    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.carts_repository.delete_cart(&mut tx, cart).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a single cart with its lines.
    async fn get_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;

    /// Retrieve the user's cart with its lines.
    async fn get_cart_by_user(&self, user: UserUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the user's cart, creating the cart on first use.
    async fn upsert_line(&self, user: UserUuid, line: NewCartLine)
    -> Result<Cart, CartsServiceError>;

    /// Remove a product from a cart owned by `user`. The cart is deleted once it is empty.
    async fn remove_line(
        &self,
        user: UserUuid,
        cart: CartUuid,
        product: ProductUuid,
    ) -> Result<RemovedLine, CartsServiceError>;

    /// Deletes a cart with the given UUID.
    async fn delete_cart(&self, cart: CartUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{add_to_cart, create_product, register_verified_user},
    };

    use super::*;

    #[tokio::test]
    async fn adding_same_product_twice_increments_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;
        let product = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;

        add_to_cart(&ctx, user.uuid, product.uuid, 2).await?;
        let cart = add_to_cart(&ctx, user.uuid, product.uuid, 3).await?;

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines.first().map(|line| line.quantity), Some(5));
        assert_eq!(cart.total, 5);

        Ok(())
    }

    #[tokio::test]
    async fn lines_snapshot_product_and_keep_insertion_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;
        let first = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;
        let second = create_product(&ctx, "Air Mineral", 4_000, 50).await?;

        add_to_cart(&ctx, user.uuid, first.uuid, 1).await?;
        add_to_cart(&ctx, user.uuid, second.uuid, 2).await?;

        let cart = ctx.carts.get_cart_by_user(user.uuid).await?;

        let names: Vec<_> = cart
            .lines
            .iter()
            .map(|line| line.product_name.as_str())
            .collect();

        assert_eq!(names, vec!["Kerupuk Udang", "Air Mineral"]);
        assert_eq!(cart.total, 3);
        assert_eq!(
            cart.lines.last().map(|line| line.product_price),
            Some(4_000)
        );

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;
        let product = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;

        let result = add_to_cart(&ctx, user.uuid, product.uuid, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;

        let result = add_to_cart(&ctx, user.uuid, ProductUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_a_line_updates_total() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;
        let first = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;
        let second = create_product(&ctx, "Air Mineral", 4_000, 50).await?;

        add_to_cart(&ctx, user.uuid, first.uuid, 1).await?;
        let cart = add_to_cart(&ctx, user.uuid, second.uuid, 2).await?;

        let removed = ctx
            .carts
            .remove_line(user.uuid, cart.uuid, second.uuid)
            .await?;
        let cart = ctx.carts.get_cart(cart.uuid).await?;

        assert_eq!(removed.product_name, "Air Mineral");
        assert!(!removed.cart_deleted);
        assert_eq!(cart.total, 1);
        assert_eq!(cart.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn removing_last_line_deletes_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;
        let product = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;

        let cart = add_to_cart(&ctx, user.uuid, product.uuid, 1).await?;

        let removed = ctx
            .carts
            .remove_line(user.uuid, cart.uuid, product.uuid)
            .await?;
        let result = ctx.carts.get_cart_by_user(user.uuid).await;

        assert!(removed.cart_deleted);
        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_missing_product_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "rinawati").await?;
        let product = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;
        let other = create_product(&ctx, "Air Mineral", 4_000, 50).await?;

        let cart = add_to_cart(&ctx, user.uuid, product.uuid, 1).await?;

        let result = ctx.carts.remove_line(user.uuid, cart.uuid, other.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotInCart)),
            "expected ProductNotInCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cannot_remove_from_another_users_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = register_verified_user(&ctx, "rinawati").await?;
        let intruder = register_verified_user(&ctx, "joko12345").await?;
        let product = create_product(&ctx, "Kerupuk Udang", 3_000, 50).await?;

        let cart = add_to_cart(&ctx, owner.uuid, product.uuid, 1).await?;

        let result = ctx
            .carts
            .remove_line(intruder.uuid, cart.uuid, product.uuid)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
        assert_eq!(ctx.carts.get_cart(cart.uuid).await?.total, 1);

        Ok(())
    }
}
