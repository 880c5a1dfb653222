//! Warunk Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::warunks::WarunksServiceError;

pub(crate) fn into_status_error(error: WarunksServiceError) -> StatusError {
    match error {
        WarunksServiceError::AlreadyExists | WarunksServiceError::AlreadyOpen => {
            StatusError::conflict().brief(error.to_string())
        }
        WarunksServiceError::NotFound | WarunksServiceError::ProductNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        WarunksServiceError::InvalidReference
        | WarunksServiceError::MissingRequiredData
        | WarunksServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid warunk payload")
        }
        WarunksServiceError::Sql(source) => {
            error!("failed to access warunk: {source}");

            StatusError::internal_server_error()
        }
    }
}
