//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => StatusError::conflict().brief("Cart already exists"),
        CartsServiceError::NotFound
        | CartsServiceError::ProductNotFound
        | CartsServiceError::ProductNotInCart => StatusError::not_found().brief(error.to_string()),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("please enter the quantity to add")
        }
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData
        | CartsServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::Sql(source) => {
            error!("failed to access cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
