//! Profile

mod handlers;

pub(crate) use handlers::*;
