//! Transactions service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        query::Page,
        transactions::{
            errors::TransactionsServiceError,
            models::{
                NewTransaction, Transaction, TransactionHistoryEntry, TransactionQuery,
                TransactionUuid,
            },
            repository::PgTransactionsRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
        }
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn record_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let recorded = self
            .repository
            .insert_transaction(&mut tx, &transaction)
            .await?;

        tx.commit().await?;

        Ok(recorded)
    }

    async fn get_transaction(
        &self,
        transaction: TransactionUuid,
    ) -> Result<Transaction, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let transaction = self.repository.get_transaction(&mut tx, transaction).await?;

        tx.commit().await?;

        Ok(transaction)
    }

    async fn list_user_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<Transaction>, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let transactions = self.repository.list_user_transactions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(transactions)
    }

    async fn history(
        &self,
        user: UserUuid,
    ) -> Result<Vec<TransactionHistoryEntry>, TransactionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self.repository.history_by_user(&mut tx, user).await?;

        tx.commit().await?;

        rows.into_iter()
            .map(|row| {
                let total_price = row
                    .product_price
                    .checked_mul(row.quantity)
                    .ok_or(TransactionsServiceError::TotalOverflow)?;

                Ok(TransactionHistoryEntry {
                    transaction_uuid: row.uuid,
                    product_uuid: row.product_uuid,
                    product_name: row.product_name,
                    image: row.product_image,
                    unit_price: row.product_price,
                    quantity: row.quantity,
                    total_price,
                    purchased_at: row.created_at,
                })
            })
            .collect()
    }

    async fn list_transactions(
        &self,
        transaction_query: TransactionQuery,
    ) -> Result<Page<Transaction>, TransactionsServiceError> {
        transaction_query.validate()?;

        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_transactions(&mut tx, &transaction_query)
            .await?;

        let total = self
            .repository
            .count_transactions(&mut tx, &transaction_query)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total,
            page: transaction_query.page,
        })
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Append a transaction to the log.
    async fn record_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<Transaction, TransactionsServiceError>;

    /// Retrieve a single transaction.
    async fn get_transaction(
        &self,
        transaction: TransactionUuid,
    ) -> Result<Transaction, TransactionsServiceError>;

    /// All transactions of a user, newest first.
    async fn list_user_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<Transaction>, TransactionsServiceError>;

    /// Purchase history of a user with product details, newest first.
    async fn history(
        &self,
        user: UserUuid,
    ) -> Result<Vec<TransactionHistoryEntry>, TransactionsServiceError>;

    /// Retrieve one page of the transaction log.
    async fn list_transactions(
        &self,
        transaction_query: TransactionQuery,
    ) -> Result<Page<Transaction>, TransactionsServiceError>;
}
