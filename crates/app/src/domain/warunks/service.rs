//! Warunks service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        products::repository::PgProductsRepository,
        users::models::UserUuid,
        warunks::{
            errors::WarunksServiceError,
            models::{NewWarunk, Warunk, WarunkStatus, WarunkUuid, same_utc_day},
            repository::PgWarunksRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWarunksService {
    db: Db,
    repository: PgWarunksRepository,
    products: PgProductsRepository,
}

impl PgWarunksService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWarunksRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl WarunksService for PgWarunksService {
    async fn open_warunk(
        &self,
        user: UserUuid,
        warunk: NewWarunk,
    ) -> Result<Warunk, WarunksServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.lock_status(&mut tx, warunk.status).await?;

        // Nothing is snapshotted or restocked once a same-day record exists.
        if let Some(latest) = self
            .repository
            .latest_warunk_by_status(&mut tx, warunk.status)
            .await?
            && same_utc_day(latest.created_at, Timestamp::now())
        {
            return Err(WarunksServiceError::AlreadyOpen);
        }

        let mut products = Vec::with_capacity(warunk.items.len());

        for target in &warunk.items {
            let product = match self.products.get_product(&mut tx, target.product).await {
                Ok(product) => product,
                Err(sqlx::Error::RowNotFound) => return Err(WarunksServiceError::ProductNotFound),
                Err(source) => return Err(source.into()),
            };

            products.push((product, target.stock));
        }

        let mut record = self
            .repository
            .insert_warunk(&mut tx, user, warunk.status)
            .await?;

        for (product, stock) in products {
            let product = if warunk.status == WarunkStatus::Open {
                self.products
                    .set_stock(&mut tx, product.uuid, stock)
                    .await?
            } else {
                product
            };

            let item = self
                .repository
                .insert_warunk_item(&mut tx, record.uuid, &product, stock)
                .await?;

            record.items.push(item);
        }

        tx.commit().await?;

        info!(
            warunk = %record.uuid,
            status = %record.status,
            items = record.items.len(),
            "warunk recorded"
        );

        Ok(record)
    }

    async fn get_warunk(&self, warunk: WarunkUuid) -> Result<Warunk, WarunksServiceError> {
        let mut tx = self.db.begin().await?;

        let mut record = self.repository.get_warunk(&mut tx, warunk).await?;
        record.items = self.repository.get_warunk_items(&mut tx, record.uuid).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait WarunksService: Send + Sync {
    /// Record an opening or closing and, when opening, release the target stock
    /// onto the catalog.
    async fn open_warunk(
        &self,
        user: UserUuid,
        warunk: NewWarunk,
    ) -> Result<Warunk, WarunksServiceError>;

    async fn get_warunk(&self, warunk: WarunkUuid) -> Result<Warunk, WarunksServiceError>;
}
