//! Balance Handlers

pub(crate) mod top_up;
