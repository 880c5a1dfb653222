//! Product lists service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::product_lists::models::ListKind;

#[derive(Debug, Error)]
pub enum ProductListsServiceError {
    #[error("list already exists")]
    AlreadyExists,

    #[error("list not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("product already in {0}")]
    AlreadyInList(ListKind),

    #[error("product not in {0}")]
    NotInList(ListKind),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductListsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_errors_name_the_list_kind() {
        assert_eq!(
            ProductListsServiceError::AlreadyInList(ListKind::Favorite).to_string(),
            "product already in favorite"
        );
        assert_eq!(
            ProductListsServiceError::AlreadyInList(ListKind::Wishlist).to_string(),
            "product already in wishlist"
        );
        assert_eq!(
            ProductListsServiceError::NotInList(ListKind::Wishlist).to_string(),
            "product not in wishlist"
        );
    }
}
