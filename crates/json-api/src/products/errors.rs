//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("product not found"),
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData
        | ProductsServiceError::InvalidAmount(_) => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::InvalidName | ProductsServiceError::InvalidQuery(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        ProductsServiceError::IncorrectPassword => {
            StatusError::forbidden().brief("password is incorrect")
        }
        ProductsServiceError::Password(source) => {
            error!("failed to verify admin password: {source}");

            StatusError::internal_server_error()
        }
        ProductsServiceError::Sql(source) => {
            error!("failed to access products: {source}");

            StatusError::internal_server_error()
        }
    }
}
