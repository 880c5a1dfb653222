//! Transaction Handlers

pub(crate) mod checkout_cart;
pub(crate) mod history;
pub(crate) mod index;
pub(crate) mod purchase;

pub(crate) use purchase::PurchaseResponse;
