//! Users service.

use async_trait::async_trait;
use mockall::automock;
use rand::Rng;
use tracing::info;

use crate::{
    auth::{hash_password, verify_password},
    database::Db,
    domain::{
        balances::repository::PgBalancesRepository,
        query::Page,
        users::{
            errors::UsersServiceError,
            models::{ProfileUpdate, Registration, Role, User, UserQuery, UserUuid},
            repository::{NewUserRecord, PgUsersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
    balances: PgBalancesRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
            balances: PgBalancesRepository::new(),
        }
    }

    /// Insert a user and its empty balance in a single transaction.
    async fn create_account(
        &self,
        registration: Registration,
        role: Role,
        verified: bool,
    ) -> Result<User, UsersServiceError> {
        registration.validate()?;

        let password_hash = hash_password(&registration.password)?;
        let activation_code = generate_activation_code();

        let mut tx = self.db.begin().await?;

        if self
            .repository
            .username_taken(&mut tx, &registration.username, None)
            .await?
        {
            return Err(UsersServiceError::UsernameTaken);
        }

        if self
            .repository
            .email_taken(&mut tx, &registration.email, None)
            .await?
        {
            return Err(UsersServiceError::EmailTaken);
        }

        let user = self
            .repository
            .create_user(
                &mut tx,
                &NewUserRecord {
                    uuid: UserUuid::new(),
                    name: registration.name.trim(),
                    username: &registration.username,
                    email: &registration.email,
                    password_hash: &password_hash,
                    role,
                    verified,
                    activation_code,
                },
            )
            .await?;

        self.balances.create_balance(&mut tx, user.uuid, 0).await?;

        tx.commit().await?;

        Ok(user)
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, registration: Registration) -> Result<User, UsersServiceError> {
        let user = self.create_account(registration, Role::User, false).await?;

        // Stands in for the activation email.
        info!(
            user_uuid = %user.uuid,
            email = %user.email,
            activation_code = user.activation_code,
            "activation code issued"
        );

        Ok(user)
    }

    async fn create_admin(&self, registration: Registration) -> Result<User, UsersServiceError> {
        let user = self.create_account(registration, Role::Admin, true).await?;

        info!(user_uuid = %user.uuid, username = %user.username, "admin account created");

        Ok(user)
    }

    async fn verify_account(&self, activation_code: u32) -> Result<User, UsersServiceError> {
        if activation_code == 0 {
            return Err(UsersServiceError::ActivationCodeEmpty);
        }

        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_activation_code(&mut tx, activation_code)
            .await?
            .ok_or(UsersServiceError::ActivationCodeWrong)?;

        if user.verified {
            return Err(UsersServiceError::AlreadyVerified);
        }

        let user = self.repository.mark_user_verified(&mut tx, user.uuid).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn list_users(&self, user_query: UserQuery) -> Result<Page<User>, UsersServiceError> {
        user_query.validate()?;

        let mut tx = self.db.begin().await?;

        let items = self.repository.list_users(&mut tx, &user_query).await?;
        let total = self.repository.count_users(&mut tx, &user_query).await?;

        tx.commit().await?;

        Ok(Page {
            items,
            total,
            page: user_query.page,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<User, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_email(&mut tx, email)
            .await?
            .ok_or(UsersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, UsersServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        if self
            .repository
            .username_taken(&mut tx, &update.username, Some(user))
            .await?
        {
            return Err(UsersServiceError::UsernameTaken);
        }

        if self
            .repository
            .email_taken(&mut tx, &update.email, Some(user))
            .await?
        {
            return Err(UsersServiceError::EmailTaken);
        }

        let updated = self
            .repository
            .update_user_profile(&mut tx, user, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_account(
        &self,
        user: UserUuid,
        password: String,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_user(&mut tx, user).await?;

        if !verify_password(&existing.password_hash, &password)? {
            return Err(UsersServiceError::IncorrectPassword);
        }

        let rows_affected = self.repository.soft_delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a buyer account. The account starts unverified with an empty balance.
    async fn register(&self, registration: Registration) -> Result<User, UsersServiceError>;

    /// Create a verified admin account.
    async fn create_admin(&self, registration: Registration) -> Result<User, UsersServiceError>;

    /// Verify the account that was issued `activation_code`.
    async fn verify_account(&self, activation_code: u32) -> Result<User, UsersServiceError>;

    /// Retrieve an active user.
    async fn get_user(&self, user: UserUuid) -> Result<User, UsersServiceError>;

    /// List active users, one page at a time.
    async fn list_users(&self, user_query: UserQuery) -> Result<Page<User>, UsersServiceError>;

    /// Retrieve an active user by email address.
    async fn find_by_email(&self, email: &str) -> Result<User, UsersServiceError>;

    /// Change name, username and email.
    async fn update_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<User, UsersServiceError>;

    /// Soft delete an account after checking its password.
    async fn delete_account(&self, user: UserUuid, password: String)
    -> Result<(), UsersServiceError>;
}

fn generate_activation_code() -> u32 {
    rand::thread_rng().gen_range(100_000..=999_999)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            query::{Filter, FilterOp, FilterValue, PageRequest, QueryError},
            users::models::UserField,
        },
        test::{
            TestContext,
            helpers::{create_admin, register_verified_user, registration},
        },
    };

    use super::*;

    #[test]
    fn activation_codes_have_six_digits() {
        for _ in 0..100 {
            let code = generate_activation_code();

            assert!((100_000..=999_999).contains(&code), "got {code}");
        }
    }

    #[tokio::test]
    async fn register_creates_unverified_buyer() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.users.register(registration("andikapratama")).await?;

        assert_eq!(user.username, "andikapratama");
        assert_eq!(user.role, Role::User);
        assert!(!user.verified);
        assert_ne!(user.password_hash, "rahasia123");

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_taken_username() -> TestResult {
        let ctx = TestContext::new().await;
        ctx.users.register(registration("andikapratama")).await?;

        let mut duplicate = registration("andikapratama");
        duplicate.email = "other@example.com".to_string();

        let result = ctx.users.register(duplicate).await;

        assert!(
            matches!(result, Err(UsersServiceError::UsernameTaken)),
            "expected UsernameTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_taken_email() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ctx.users.register(registration("andikapratama")).await?;

        let mut duplicate = registration("andikasaja");
        duplicate.email = first.email.to_uppercase();

        let result = ctx.users.register(duplicate).await;

        assert!(
            matches!(result, Err(UsersServiceError::EmailTaken)),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn verify_account_marks_user_verified_once() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.users.register(registration("andikapratama")).await?;

        let verified = ctx.users.verify_account(user.activation_code).await?;
        let again = ctx.users.verify_account(user.activation_code).await;

        assert!(verified.verified);
        assert!(
            matches!(again, Err(UsersServiceError::AlreadyVerified)),
            "expected AlreadyVerified, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn verify_account_rejects_empty_and_wrong_codes() {
        let ctx = TestContext::new().await;

        let empty = ctx.users.verify_account(0).await;
        let wrong = ctx.users.verify_account(123_456).await;

        assert!(
            matches!(empty, Err(UsersServiceError::ActivationCodeEmpty)),
            "expected ActivationCodeEmpty, got {empty:?}"
        );
        assert!(
            matches!(wrong, Err(UsersServiceError::ActivationCodeWrong)),
            "expected ActivationCodeWrong, got {wrong:?}"
        );
    }

    #[tokio::test]
    async fn create_admin_is_verified() -> TestResult {
        let ctx = TestContext::new().await;

        let admin = ctx.users.create_admin(registration("adminwarunk")).await?;

        assert_eq!(admin.role, Role::Admin);
        assert!(admin.verified);

        Ok(())
    }

    #[tokio::test]
    async fn update_profile_keeps_own_username_and_rejects_others() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "andikapratama").await?;
        let other = register_verified_user(&ctx, "budisantoso").await?;

        let renamed = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: "Andika P".to_string(),
                    username: user.username.clone(),
                    email: user.email.clone(),
                },
            )
            .await?;

        let clash = ctx
            .users
            .update_profile(
                user.uuid,
                ProfileUpdate {
                    name: "Andika P".to_string(),
                    username: other.username.clone(),
                    email: user.email.clone(),
                },
            )
            .await;

        assert_eq!(renamed.name, "Andika P");
        assert!(
            matches!(clash, Err(UsersServiceError::UsernameTaken)),
            "expected UsernameTaken, got {clash:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_account_requires_password() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_verified_user(&ctx, "andikapratama").await?;

        let wrong = ctx
            .users
            .delete_account(user.uuid, "salah-sandi".to_string())
            .await;

        assert!(
            matches!(wrong, Err(UsersServiceError::IncorrectPassword)),
            "expected IncorrectPassword, got {wrong:?}"
        );

        ctx.users
            .delete_account(user.uuid, "rahasia123".to_string())
            .await?;

        let result = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_users_filters_pages_and_skips_deleted_accounts() -> TestResult {
        let ctx = TestContext::new().await;
        create_admin(&ctx).await?;
        let kept = register_verified_user(&ctx, "ratnasari").await?;
        register_verified_user(&ctx, "ratnadewi").await?;
        let deleted = register_verified_user(&ctx, "ratnaayu").await?;

        ctx.users
            .delete_account(deleted.uuid, "rahasia123".to_string())
            .await?;

        let buyers = ctx
            .users
            .list_users(UserQuery {
                filters: vec![
                    Filter::new(
                        UserField::Role,
                        FilterOp::Eq,
                        FilterValue::Text("User".to_string()),
                    ),
                    Filter::new(
                        UserField::Username,
                        FilterOp::Contains,
                        FilterValue::Text("ratna".to_string()),
                    ),
                ],
                sort: None,
                page: PageRequest::new(1, 2)?,
            })
            .await?;

        assert_eq!(buyers.total, 2);
        assert_eq!(buyers.items.len(), 1);
        assert!(
            buyers.items.iter().all(|user| user.uuid != deleted.uuid),
            "deleted account listed"
        );

        let everyone = ctx.users.list_users(UserQuery::default()).await?;

        assert_eq!(everyone.total, 3);
        assert!(everyone.items.iter().any(|user| user.uuid == kept.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn list_users_rejects_mismatched_filter() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .list_users(UserQuery {
                filters: vec![Filter::new(
                    UserField::CreatedAt,
                    FilterOp::Eq,
                    FilterValue::Integer(1),
                )],
                ..UserQuery::default()
            })
            .await;

        assert!(
            matches!(
                result,
                Err(UsersServiceError::InvalidQuery(QueryError::ValueMismatch(_)))
            ),
            "expected InvalidQuery, got {result:?}"
        );
    }
}
