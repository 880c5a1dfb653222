//! Product lists service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        product_lists::{
            errors::ProductListsServiceError,
            models::{ListKind, ProductList, ProductListUuid, RemovedListItem},
            repository::PgProductListsRepository,
        },
        products::{models::ProductUuid, repository::PgProductsRepository},
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductListsService {
    db: Db,
    repository: PgProductListsRepository,
    products: PgProductsRepository,
}

impl PgProductListsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductListsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    async fn with_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut list: ProductList,
    ) -> Result<ProductList, ProductListsServiceError> {
        list.items = self.repository.get_list_items(tx, list.uuid).await?;

        Ok(list)
    }
}

#[async_trait]
impl ProductListsService for PgProductListsService {
    async fn get_list(
        &self,
        user: UserUuid,
        kind: ListKind,
    ) -> Result<ProductList, ProductListsServiceError> {
        let mut tx = self.db.begin().await?;

        let list = self.repository.get_list_by_user(&mut tx, user, kind).await?;
        let list = self.with_items(&mut tx, list).await?;

        tx.commit().await?;

        Ok(list)
    }

    async fn add_product(
        &self,
        user: UserUuid,
        kind: ListKind,
        product: ProductUuid,
    ) -> Result<ProductList, ProductListsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = match self.products.get_product(&mut tx, product).await {
            Ok(product) => product,
            Err(sqlx::Error::RowNotFound) => return Err(ProductListsServiceError::ProductNotFound),
            Err(source) => return Err(source.into()),
        };

        let list = self
            .repository
            .get_or_create_list(&mut tx, user, kind)
            .await?;

        self.repository
            .insert_list_item(&mut tx, list.uuid, &product)
            .await?
            .ok_or(ProductListsServiceError::AlreadyInList(kind))?;

        let list = self.with_items(&mut tx, list).await?;

        tx.commit().await?;

        Ok(list)
    }

    async fn remove_product(
        &self,
        user: UserUuid,
        kind: ListKind,
        list: ProductListUuid,
        product: ProductUuid,
    ) -> Result<RemovedListItem, ProductListsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .get_list_for_update(&mut tx, list)
            .await?
            .filter(|existing| existing.user_uuid == user && existing.kind == kind)
            .ok_or(ProductListsServiceError::NotFound)?;

        match self
            .products
            .get_product_including_deleted(&mut tx, product)
            .await
        {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(ProductListsServiceError::ProductNotFound),
            Err(source) => return Err(source.into()),
        }

        let removed = self
            .repository
            .delete_list_item(&mut tx, existing.uuid, product)
            .await?
            .ok_or(ProductListsServiceError::NotInList(kind))?;

        let remaining = self
            .repository
            .count_list_items(&mut tx, existing.uuid)
            .await?;

        if remaining == 0 {
            self.repository.delete_list(&mut tx, existing.uuid).await?;
        }

        tx.commit().await?;

        Ok(RemovedListItem {
            list: existing.uuid,
            product_name: removed.product_name,
            list_deleted: remaining == 0,
        })
    }
}

#[automock]
#[async_trait]
pub trait ProductListsService: Send + Sync {
    /// Retrieve the user's list of the given kind with its products.
    async fn get_list(
        &self,
        user: UserUuid,
        kind: ListKind,
    ) -> Result<ProductList, ProductListsServiceError>;

    /// Add a product to the user's list, creating the list on first use.
    async fn add_product(
        &self,
        user: UserUuid,
        kind: ListKind,
        product: ProductUuid,
    ) -> Result<ProductList, ProductListsServiceError>;

    /// Remove a product from a list owned by `user`. The list is deleted once it is empty.
    async fn remove_product(
        &self,
        user: UserUuid,
        kind: ListKind,
        list: ProductListUuid,
        product: ProductUuid,
    ) -> Result<RemovedListItem, ProductListsServiceError>;
}
