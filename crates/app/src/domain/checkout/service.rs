//! Checkout service.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        balances::repository::PgBalancesRepository,
        carts::{
            models::CartUuid,
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        checkout::{
            errors::CheckoutError,
            models::PurchaseReceipt,
            rules::{ensure_purchasable, line_cost},
        },
        products::{
            models::{Product, ProductUuid},
            repository::PgProductsRepository,
        },
        transactions::{
            models::{NewTransaction, TransactionStatus},
            repository::PgTransactionsRepository,
        },
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCheckoutService {
    db: Db,
    deadline: Duration,
    users: PgUsersRepository,
    products: PgProductsRepository,
    balances: PgBalancesRepository,
    carts: PgCartsRepository,
    cart_lines: PgCartLinesRepository,
    transactions: PgTransactionsRepository,
}

impl PgCheckoutService {
    /// Every checkout call is abandoned once `deadline` has passed.
    #[must_use]
    pub fn new(db: Db, deadline: Duration) -> Self {
        Self {
            db,
            deadline,
            users: PgUsersRepository::new(),
            products: PgProductsRepository::new(),
            balances: PgBalancesRepository::new(),
            carts: PgCartsRepository::new(),
            cart_lines: PgCartLinesRepository::new(),
            transactions: PgTransactionsRepository::new(),
        }
    }

    async fn purchase_one_now(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<PurchaseReceipt, CheckoutError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product_for_update(&mut tx, product)
            .await?
            .ok_or(CheckoutError::ProductNotFound)?;

        let buyer = not_found_as(
            self.users.get_user(&mut tx, user).await,
            CheckoutError::UserNotFound,
        )?;

        ensure_purchasable(&product, quantity)?;

        let cost = line_cost(product.price, quantity)?;

        let balance = not_found_as(
            self.balances.get_balance_by_user(&mut tx, user).await,
            CheckoutError::BalanceNotFound,
        )?;

        if balance.amount < cost {
            return Err(CheckoutError::InsufficientFunds {
                product: product.name,
            });
        }

        self.purchase_line(&mut tx, user, &product, quantity, cost)
            .await?;

        tx.commit().await?;

        Ok(PurchaseReceipt {
            buyer_name: buyer.name,
            product_name: product.name,
            quantity,
        })
    }

    async fn purchase_cart_now(
        &self,
        user: UserUuid,
        cart: CartUuid,
    ) -> Result<PurchaseReceipt, CheckoutError> {
        // Holds the cart row lock until the cart is deleted, so a second checkout of the
        // same cart waits here and then finds it gone. Lines commit on their own
        // connections meanwhile.
        let mut cart_tx = self.db.begin().await?;

        let cart = self
            .carts
            .get_cart_for_update(&mut cart_tx, cart)
            .await?
            .filter(|cart| cart.user_uuid == user)
            .ok_or(CheckoutError::CartNotFound)?;

        let buyer = not_found_as(
            self.users.get_user(&mut cart_tx, user).await,
            CheckoutError::UserNotFound,
        )?;

        let lines = self
            .cart_lines
            .get_cart_lines(&mut cart_tx, cart.uuid)
            .await?;

        let balance = not_found_as(
            self.balances.get_balance_by_user(&mut cart_tx, user).await,
            CheckoutError::BalanceNotFound,
        )?;

        let first_product_name = lines
            .first()
            .map(|line| line.product_name.clone())
            .ok_or(CheckoutError::EmptyCart)?;

        let mut remaining_balance = balance.amount;

        // A rejected line leaves earlier lines committed and the cart in place.
        for line in &lines {
            let mut tx = self.db.begin().await?;

            let product = self
                .products
                .get_product_for_update(&mut tx, line.product_uuid)
                .await?
                .ok_or(CheckoutError::ProductNotFound)?;

            ensure_purchasable(&product, line.quantity)?;

            let cost = line_cost(product.price, line.quantity)?;

            if remaining_balance < cost {
                return Err(CheckoutError::InsufficientFunds {
                    product: product.name,
                });
            }

            remaining_balance = self
                .purchase_line(&mut tx, user, &product, line.quantity, cost)
                .await?;

            tx.commit().await?;

            info!(
                user_uuid = %user,
                cart_uuid = %cart.uuid,
                product_uuid = %product.uuid,
                quantity = line.quantity,
                cost,
                "cart line purchased"
            );
        }

        self.carts.delete_cart(&mut cart_tx, cart.uuid).await?;

        cart_tx.commit().await?;

        Ok(PurchaseReceipt {
            buyer_name: buyer.name,
            product_name: first_product_name,
            quantity: cart.total,
        })
    }

    /// Debit the buyer, take the stock and log the transaction. Returns the remaining
    /// balance.
    ///
    /// Both updates are conditional, so a concurrent purchase that got there first
    /// surfaces as the matching rejection instead of a negative balance or stock.
    async fn purchase_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        product: &Product,
        quantity: u64,
        cost: u64,
    ) -> Result<u64, CheckoutError> {
        let debited = self
            .balances
            .adjust_balance(tx, user, -i64::try_from(cost)?)
            .await?
            .ok_or_else(|| CheckoutError::InsufficientFunds {
                product: product.name.clone(),
            })?;

        self.products
            .decrement_stock(tx, product.uuid, quantity)
            .await?
            .ok_or_else(|| CheckoutError::InsufficientStock {
                product: product.name.clone(),
            })?;

        self.transactions
            .insert_transaction(
                tx,
                &NewTransaction {
                    user_uuid: user,
                    product_uuid: product.uuid,
                    quantity,
                    status: TransactionStatus::Succeeded,
                },
            )
            .await?;

        Ok(debited.amount)
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    async fn purchase_one(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<PurchaseReceipt, CheckoutError> {
        let result = timeout(self.deadline, self.purchase_one_now(user, product, quantity))
            .await
            .map_err(CheckoutError::from)
            .and_then(|result| result);

        match &result {
            Ok(receipt) => info!(
                user_uuid = %user,
                product_uuid = %product,
                quantity = receipt.quantity,
                "purchase succeeded"
            ),
            Err(error) => warn!(
                user_uuid = %user,
                product_uuid = %product,
                quantity,
                "purchase not completed: {error}"
            ),
        }

        result
    }

    async fn purchase_cart(
        &self,
        user: UserUuid,
        cart: CartUuid,
    ) -> Result<PurchaseReceipt, CheckoutError> {
        let result = timeout(self.deadline, self.purchase_cart_now(user, cart))
            .await
            .map_err(CheckoutError::from)
            .and_then(|result| result);

        match &result {
            Ok(receipt) => info!(
                user_uuid = %user,
                cart_uuid = %cart,
                quantity = receipt.quantity,
                "cart checkout succeeded"
            ),
            Err(error) => warn!(
                user_uuid = %user,
                cart_uuid = %cart,
                "cart checkout not completed: {error}"
            ),
        }

        result
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Buy `quantity` units of a single product.
    async fn purchase_one(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u64,
    ) -> Result<PurchaseReceipt, CheckoutError>;

    /// Buy every line of the user's cart in order, then delete the cart.
    ///
    /// Lines are committed one at a time. When a line is rejected the remaining lines
    /// are skipped, lines already bought stay bought and the cart is kept.
    async fn purchase_cart(
        &self,
        user: UserUuid,
        cart: CartUuid,
    ) -> Result<PurchaseReceipt, CheckoutError>;
}

/// Map a missing row to `error`, keeping other storage failures as they are.
fn not_found_as<T>(
    result: Result<T, sqlx::Error>,
    error: CheckoutError,
) -> Result<T, CheckoutError> {
    match result {
        Ok(value) => Ok(value),
        Err(sqlx::Error::RowNotFound) => Err(error),
        Err(source) => Err(source.into()),
    }
}
