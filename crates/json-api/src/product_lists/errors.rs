//! Product List Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::product_lists::ProductListsServiceError;

pub(crate) fn into_status_error(error: ProductListsServiceError) -> StatusError {
    match error {
        ProductListsServiceError::AlreadyExists | ProductListsServiceError::AlreadyInList(_) => {
            StatusError::conflict().brief(error.to_string())
        }
        ProductListsServiceError::NotFound
        | ProductListsServiceError::ProductNotFound
        | ProductListsServiceError::NotInList(_) => {
            StatusError::not_found().brief(error.to_string())
        }
        ProductListsServiceError::InvalidReference
        | ProductListsServiceError::MissingRequiredData
        | ProductListsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid list payload")
        }
        ProductListsServiceError::Sql(source) => {
            error!("failed to access product list: {source}");

            StatusError::internal_server_error()
        }
    }
}
