//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("username or password is incorrect")]
    InvalidCredentials,

    #[error("please verify your account first")]
    Unverified,

    #[error("invalid token")]
    InvalidToken,

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("password verification error")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        Self::Token(error)
    }
}
