//! Transaction Errors

use salvo::http::StatusError;
use tracing::error;

use warunk_app::domain::{checkout::CheckoutError, transactions::TransactionsServiceError};

pub(crate) fn into_status_error(error: TransactionsServiceError) -> StatusError {
    match error {
        TransactionsServiceError::NotFound => StatusError::not_found(),
        TransactionsServiceError::InvalidQuery(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        TransactionsServiceError::AlreadyExists
        | TransactionsServiceError::InvalidReference
        | TransactionsServiceError::MissingRequiredData
        | TransactionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid transaction payload")
        }
        TransactionsServiceError::TotalOverflow | TransactionsServiceError::InvalidAmount(_) => {
            error!("transaction amounts out of range: {error}");

            StatusError::internal_server_error()
        }
        TransactionsServiceError::Sql(source) => {
            error!("failed to access transactions: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn checkout_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::ProductNotFound
        | CheckoutError::UserNotFound
        | CheckoutError::CartNotFound
        | CheckoutError::BalanceNotFound => StatusError::not_found().brief(error.to_string()),
        CheckoutError::EmptyCart
        | CheckoutError::InvalidQuantity
        | CheckoutError::OutOfStock { .. }
        | CheckoutError::InsufficientStock { .. }
        | CheckoutError::InsufficientFunds { .. }
        | CheckoutError::CostOverflow => StatusError::bad_request().brief(error.to_string()),
        CheckoutError::Timeout(_) => {
            error!("checkout exceeded its deadline");

            StatusError::gateway_timeout().brief("Checkout timed out, please try again")
        }
        CheckoutError::InvalidAmount(source) => {
            error!("checkout amount out of range: {source}");

            StatusError::internal_server_error()
        }
        CheckoutError::Sql(source) => {
            error!("checkout failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
