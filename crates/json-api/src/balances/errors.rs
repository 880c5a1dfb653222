//! Balance Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::balances::BalancesServiceError;

pub(crate) fn into_status_error(error: BalancesServiceError) -> StatusError {
    match error {
        BalancesServiceError::NotFound | BalancesServiceError::EmailNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        BalancesServiceError::ZeroAmount | BalancesServiceError::InsufficientFunds => {
            StatusError::bad_request().brief(error.to_string())
        }
        BalancesServiceError::AlreadyExists => StatusError::conflict(),
        BalancesServiceError::InvalidReference | BalancesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid balance payload")
        }
        BalancesServiceError::InvalidAmount(source) => {
            error!("balance amount out of range: {source}");

            StatusError::bad_request().brief("Amount is too large")
        }
        BalancesServiceError::Sql(source) => {
            error!("failed to access balance: {source}");

            StatusError::internal_server_error()
        }
    }
}
