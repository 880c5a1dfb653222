//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{
        AuthServiceError, IssuedToken, JwtSecret, Principal, decode_token, issue_token,
        verify_password,
    },
    database::Db,
    domain::users::{models::UserUuid, repository::PgUsersRepository},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    secret: JwtSecret,
    token_lifetime: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, secret: JwtSecret, token_lifetime: SignedDuration) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            secret,
            token_lifetime,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users
            .find_user_by_username(&mut tx, username)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        tx.commit().await?;

        if !verify_password(&user.password_hash, password)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !user.verified {
            return Err(AuthServiceError::Unverified);
        }

        let (token, expires_at) = issue_token(
            &self.secret,
            user.uuid,
            user.role,
            Timestamp::now(),
            self.token_lifetime,
        )?;

        Ok(IssuedToken {
            token,
            username: user.username,
            expires_at,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let claims = decode_token(&self.secret, bearer_token).map_err(|source| {
            debug!("rejected bearer token: {source}");

            AuthServiceError::InvalidToken
        })?;

        let mut tx = self.db.begin().await?;

        let user = match self
            .users
            .get_user(&mut tx, UserUuid::from_uuid(claims.sub))
            .await
        {
            Ok(user) => user,
            Err(sqlx::Error::RowNotFound) => return Err(AuthServiceError::InvalidToken),
            Err(source) => return Err(source.into()),
        };

        tx.commit().await?;

        // Role comes from storage, not from the token claims.
        Ok(Principal {
            user: user.uuid,
            role: user.role,
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthServiceError>;

    /// Resolve a bearer token to the calling user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}
