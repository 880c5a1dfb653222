//! Balances service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        balances::{
            errors::BalancesServiceError,
            models::{Balance, TopUpReceipt},
            repository::PgBalancesRepository,
        },
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

const TOP_UP_MESSAGE: &str = "balance added to account";

#[derive(Debug, Clone)]
pub struct PgBalancesService {
    db: Db,
    repository: PgBalancesRepository,
    users: PgUsersRepository,
}

impl PgBalancesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBalancesRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl BalancesService for PgBalancesService {
    async fn get_balance(&self, user: UserUuid) -> Result<Balance, BalancesServiceError> {
        let mut tx = self.db.begin().await?;

        let balance = self.repository.get_balance_by_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(balance)
    }

    async fn create_balance(&self, user: UserUuid) -> Result<Balance, BalancesServiceError> {
        let mut tx = self.db.begin().await?;

        let balance = self.repository.create_balance(&mut tx, user, 0).await?;

        tx.commit().await?;

        Ok(balance)
    }

    async fn adjust_balance(
        &self,
        user: UserUuid,
        delta: i64,
    ) -> Result<Balance, BalancesServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(balance) = self.repository.adjust_balance(&mut tx, user, delta).await? else {
            if self.repository.balance_exists(&mut tx, user).await? {
                return Err(BalancesServiceError::InsufficientFunds);
            }

            return Err(BalancesServiceError::NotFound);
        };

        tx.commit().await?;

        Ok(balance)
    }

    async fn top_up(&self, email: &str, amount: u64) -> Result<TopUpReceipt, BalancesServiceError> {
        if amount == 0 {
            return Err(BalancesServiceError::ZeroAmount);
        }

        let delta = i64::try_from(amount)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_user_by_email(&mut tx, email)
            .await?
            .ok_or(BalancesServiceError::EmailNotFound)?;

        let balance = self
            .repository
            .adjust_balance(&mut tx, user.uuid, delta)
            .await?
            .ok_or(BalancesServiceError::NotFound)?;

        tx.commit().await?;

        info!(
            user_uuid = %user.uuid,
            amount,
            balance = balance.amount,
            "balance topped up"
        );

        Ok(TopUpReceipt {
            name: user.name,
            amount,
            balance: balance.amount,
            message: TOP_UP_MESSAGE.to_string(),
        })
    }
}

#[automock]
#[async_trait]
pub trait BalancesService: Send + Sync {
    /// Retrieve the balance owned by a user.
    async fn get_balance(&self, user: UserUuid) -> Result<Balance, BalancesServiceError>;

    /// Create an empty balance for a user.
    async fn create_balance(&self, user: UserUuid) -> Result<Balance, BalancesServiceError>;

    /// Add a signed amount to a user's balance. Debits that would overdraw the balance are
    /// rejected without changing it.
    async fn adjust_balance(&self, user: UserUuid, delta: i64)
    -> Result<Balance, BalancesServiceError>;

    /// Credit the balance of the account registered with `email`.
    async fn top_up(&self, email: &str, amount: u64) -> Result<TopUpReceipt, BalancesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::register_verified_user};

    use super::*;

    #[tokio::test]
    async fn registration_creates_empty_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "sitiaminah").await?;

        let balance = ctx.balances.get_balance(user.uuid).await?;

        assert_eq!(balance.user_uuid, user.uuid);
        assert_eq!(balance.amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn top_up_adds_without_upper_bound() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "sitiaminah").await?;

        ctx.balances.top_up(&user.email, 2000).await?;
        let receipt = ctx.balances.top_up(&user.email, 5000).await?;

        assert_eq!(receipt.name, user.name);
        assert_eq!(receipt.amount, 5000);
        assert_eq!(receipt.balance, 7000);
        assert_eq!(ctx.balances.get_balance(user.uuid).await?.amount, 7000);

        Ok(())
    }

    #[tokio::test]
    async fn top_up_unknown_email_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.balances.top_up("nobody@example.com", 1000).await;

        assert!(
            matches!(result, Err(BalancesServiceError::EmailNotFound)),
            "expected EmailNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn top_up_zero_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "sitiaminah").await?;

        let result = ctx.balances.top_up(&user.email, 0).await;

        assert!(
            matches!(result, Err(BalancesServiceError::ZeroAmount)),
            "expected ZeroAmount, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn overdrawing_debit_leaves_balance_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "sitiaminah").await?;

        ctx.balances.adjust_balance(user.uuid, 1500).await?;

        let result = ctx.balances.adjust_balance(user.uuid, -2000).await;

        assert!(
            matches!(result, Err(BalancesServiceError::InsufficientFunds)),
            "expected InsufficientFunds, got {result:?}"
        );
        assert_eq!(ctx.balances.get_balance(user.uuid).await?.amount, 1500);

        Ok(())
    }

    #[tokio::test]
    async fn adjust_missing_balance_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.balances.adjust_balance(UserUuid::new(), 100).await;

        assert!(
            matches!(result, Err(BalancesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn second_balance_for_user_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "sitiaminah").await?;

        let result = ctx.balances.create_balance(user.uuid).await;

        assert!(
            matches!(result, Err(BalancesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
