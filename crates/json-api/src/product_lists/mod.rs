//! Favorites and Wishlists
//!
//! Both lists share these handlers. The router selects the list with [`favorite`] or
//! [`wishlist`], which store the [`ListKind`] in the depot.

mod errors;
mod handlers;

use salvo::prelude::*;

use warunk_app::domain::product_lists::models::ListKind;

pub(crate) use errors::*;
pub(crate) use handlers::*;

#[salvo::handler]
pub(crate) async fn favorite(depot: &mut Depot) {
    depot.inject(ListKind::Favorite);
}

#[salvo::handler]
pub(crate) async fn wishlist(depot: &mut Depot) {
    depot.inject(ListKind::Wishlist);
}
