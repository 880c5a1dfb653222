//! User Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::NotFound => StatusError::not_found().brief("user not found"),
        UsersServiceError::AlreadyExists
        | UsersServiceError::UsernameTaken
        | UsersServiceError::EmailTaken
        | UsersServiceError::AlreadyVerified => StatusError::conflict().brief(error.to_string()),
        UsersServiceError::PasswordMismatch
        | UsersServiceError::PasswordTooShort(..)
        | UsersServiceError::InvalidUsername(..)
        | UsersServiceError::InvalidEmail
        | UsersServiceError::MissingName
        | UsersServiceError::ActivationCodeEmpty
        | UsersServiceError::ActivationCodeWrong
        | UsersServiceError::InvalidData
        | UsersServiceError::InvalidQuery(_) => StatusError::bad_request().brief(error.to_string()),
        UsersServiceError::IncorrectPassword => {
            StatusError::forbidden().brief("password is incorrect")
        }
        UsersServiceError::Password(source) => {
            error!("failed to hash or verify password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("failed to access users: {source}");

            StatusError::internal_server_error()
        }
    }
}
