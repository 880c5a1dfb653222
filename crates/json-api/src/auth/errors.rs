//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("username or password is incorrect")
        }
        AuthServiceError::Unverified => {
            StatusError::forbidden().brief("please verify your account first")
        }
        AuthServiceError::InvalidToken => StatusError::unauthorized().brief("Invalid token"),
        AuthServiceError::Token(source) => {
            error!("failed to process token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to verify password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to authenticate: {source}");

            StatusError::internal_server_error()
        }
    }
}
