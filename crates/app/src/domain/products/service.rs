//! Products service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    auth::verify_password,
    database::Db,
    domain::{
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, Product, ProductQuery, ProductUpdate, ProductUuid},
            repository::{PgProductsRepository, ProductRecord},
            slug::{slugify, with_random_suffix},
        },
        query::Page,
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    users: PgUsersRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            users: PgUsersRepository::new(),
        }
    }

    /// Derive a slug from `name`, adding a random suffix once if it is already in use.
    async fn unique_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
        except: Option<ProductUuid>,
    ) -> Result<String, ProductsServiceError> {
        let slug = slugify(name);

        if slug.is_empty() {
            return Err(ProductsServiceError::InvalidName);
        }

        if self.repository.slug_taken(tx, &slug, except).await? {
            return Ok(with_random_suffix(&slug));
        }

        Ok(slug)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        product_query: ProductQuery,
    ) -> Result<Page<Product>, ProductsServiceError> {
        product_query.validate()?;

        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_products(&mut tx, &product_query)
            .await?;

        let total = self
            .repository
            .count_products(&mut tx, &product_query)
            .await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total,
            page: product_query.page,
        })
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let slug = self.unique_slug(&mut tx, &product.name, None).await?;

        let created = self
            .repository
            .create_product(
                &mut tx,
                product.uuid,
                &ProductRecord {
                    slug: &slug,
                    name: product.name.trim(),
                    detail: &product.detail,
                    price: product.price,
                    stock: product.stock,
                    category: &product.category,
                    image: &product.image,
                },
            )
            .await?;

        tx.commit().await?;

        info!(product_uuid = %created.uuid, slug = %created.slug, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_product(&mut tx, product).await?;

        let name = update.name.unwrap_or(existing.name);
        let slug = self.unique_slug(&mut tx, &name, Some(product)).await?;

        let updated = self
            .repository
            .update_product(
                &mut tx,
                product,
                &ProductRecord {
                    slug: &slug,
                    name: name.trim(),
                    detail: update.detail.as_deref().unwrap_or(&existing.detail),
                    price: update.price.unwrap_or(existing.price),
                    stock: update.stock.unwrap_or(existing.stock),
                    category: update.category.as_deref().unwrap_or(&existing.category),
                    image: update.image.as_deref().unwrap_or(&existing.image),
                },
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        product: ProductUuid,
        admin: UserUuid,
        password: String,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let admin = self.users.get_user(&mut tx, admin).await?;

        if !verify_password(&admin.password_hash, &password)? {
            return Err(ProductsServiceError::IncorrectPassword);
        }

        let rows_affected = self
            .repository
            .soft_delete_product(&mut tx, product)
            .await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product_uuid = %product, admin_uuid = %admin.uuid, "product deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieve one page of active products.
    async fn list_products(
        &self,
        product_query: ProductQuery,
    ) -> Result<Page<Product>, ProductsServiceError>;

    /// Retrieve a single active product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Retrieve a single active product by its slug.
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError>;

    /// Creates a new product, deriving its slug from the name.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Updates a product and re-derives its slug.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Soft deletes a product once the acting admin's password has been checked.
    async fn delete_product(
        &self,
        product: ProductUuid,
        admin: UserUuid,
        password: String,
    ) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            products::models::ProductField,
            query::{Filter, FilterOp, FilterValue, PageRequest, Sort, SortDirection},
        },
        test::{
            TestContext,
            helpers::{create_admin, create_product, new_product},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_product_round_trips() -> TestResult {
        let ctx = TestContext::new().await;
        let new = new_product("Kopi Susu Gula Aren", 18_000, 12);

        let created = ctx.products.create_product(new.clone()).await?;
        let fetched = ctx.products.get_product(new.uuid).await?;

        assert_eq!(created, fetched);
        assert_eq!(fetched.uuid, new.uuid);
        assert_eq!(fetched.slug, "kopi-susu-gula-aren");
        assert_eq!(fetched.name, new.name);
        assert_eq!(fetched.detail, new.detail);
        assert_eq!(fetched.price, 18_000);
        assert_eq!(fetched.stock, 12);
        assert_eq!(fetched.category, new.category);
        assert_eq!(fetched.image, new.image);
        assert!(fetched.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn colliding_slug_gets_suffix() -> TestResult {
        let ctx = TestContext::new().await;

        let first = create_product(&ctx, "Teh Botol", 5_000, 10).await?;
        let second = create_product(&ctx, "Teh Botol", 5_000, 10).await?;

        assert_eq!(first.slug, "teh-botol");
        assert!(
            second.slug.starts_with("teh-botol-") && second.slug.len() == "teh-botol-".len() + 3,
            "unexpected slug {}",
            second.slug
        );

        Ok(())
    }

    #[tokio::test]
    async fn symbol_only_name_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product("???", 1_000, 1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidName)),
            "expected InvalidName, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_product_by_slug_finds_active_product() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Roti Bakar", 12_000, 4).await?;

        let fetched = ctx.products.get_product_by_slug("roti-bakar").await?;

        assert_eq!(fetched.uuid, created.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_sorts_and_pages() -> TestResult {
        let ctx = TestContext::new().await;

        create_product(&ctx, "Kopi Hitam", 8_000, 10).await?;
        create_product(&ctx, "Kopi Susu", 12_000, 10).await?;
        create_product(&ctx, "Kopi Luwak", 90_000, 2).await?;
        create_product(&ctx, "Es Teh", 4_000, 30).await?;

        let query = ProductQuery {
            filters: vec![
                Filter::new(
                    ProductField::Name,
                    FilterOp::Contains,
                    FilterValue::Text("kopi".to_string()),
                ),
                Filter::new(
                    ProductField::Price,
                    FilterOp::Lt,
                    FilterValue::Integer(50_000),
                ),
            ],
            sort: Some(Sort {
                field: ProductField::Price,
                direction: SortDirection::Asc,
            }),
            page: PageRequest::new(1, 2)?,
        };

        let page = ctx.products.list_products(query.clone()).await?;
        let again = ctx.products.list_products(query).await?;

        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.items.first().map(|p| p.name.as_str()),
            Some("Kopi Susu")
        );
        assert_eq!(page, again);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_rejects_mismatched_filter() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .list_products(ProductQuery {
                filters: vec![Filter::new(
                    ProductField::Stock,
                    FilterOp::Eq,
                    FilterValue::Text("many".to_string()),
                )],
                ..ProductQuery::default()
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidQuery(_))),
            "expected InvalidQuery, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_product_reslugs_and_keeps_unset_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Nasi Uduk", 15_000, 5).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    name: Some("Nasi Uduk Betawi".to_string()),
                    price: Some(17_000),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.slug, "nasi-uduk-betawi");
        assert_eq!(updated.price, 17_000);
        assert_eq!(updated.stock, 5);
        assert_eq!(updated.detail, created.detail);

        Ok(())
    }

    #[tokio::test]
    async fn update_keeping_name_keeps_slug() -> TestResult {
        let ctx = TestContext::new().await;
        let created = create_product(&ctx, "Nasi Uduk", 15_000, 5).await?;

        let updated = ctx
            .products
            .update_product(
                created.uuid,
                ProductUpdate {
                    stock: Some(9),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.slug, "nasi-uduk");
        assert_eq!(updated.stock, 9);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_requires_admin_password() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_admin(&ctx).await?;
        let product = create_product(&ctx, "Pisang Goreng", 2_000, 20).await?;

        let result = ctx
            .products
            .delete_product(product.uuid, admin.uuid, "salah-sandi".to_string())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::IncorrectPassword)),
            "expected IncorrectPassword, got {result:?}"
        );
        assert!(ctx.products.get_product(product.uuid).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn deleted_product_is_hidden_and_cannot_be_deleted_twice() -> TestResult {
        let ctx = TestContext::new().await;
        let admin = create_admin(&ctx).await?;
        let product = create_product(&ctx, "Pisang Goreng", 2_000, 20).await?;

        ctx.products
            .delete_product(product.uuid, admin.uuid, "rahasia123".to_string())
            .await?;

        let fetched = ctx.products.get_product(product.uuid).await;
        let listed = ctx.products.list_products(ProductQuery::default()).await?;
        let again = ctx
            .products
            .delete_product(product.uuid, admin.uuid, "rahasia123".to_string())
            .await;

        assert!(
            matches!(fetched, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {fetched:?}"
        );
        assert_eq!(listed.total, 0);
        assert!(
            matches!(again, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }
}
