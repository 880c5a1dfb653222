//! Users service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{auth::PasswordError, domain::query::QueryError};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user not found")]
    NotFound,

    #[error("user already exists")]
    AlreadyExists,

    #[error("username already exists")]
    UsernameTaken,

    #[error("email already exists")]
    EmailTaken,

    #[error("password does not match")]
    PasswordMismatch,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("username must be {0}-{1} alphanumeric characters")]
    InvalidUsername(usize, usize),

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("name is required")]
    MissingName,

    #[error("activation code is empty")]
    ActivationCodeEmpty,

    #[error("activation code is wrong")]
    ActivationCodeWrong,

    #[error("email already verified")]
    AlreadyVerified,

    #[error("password is incorrect")]
    IncorrectPassword,

    #[error("password hashing failed")]
    Password(#[from] PasswordError),

    #[error("invalid data")]
    InvalidData,

    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
