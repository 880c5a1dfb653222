//! App Router

use salvo::Router;

use crate::{
    auth, balances, carts, dashboard, product_lists, products, profile, transactions, users,
    warunks,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(public_router())
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(authenticated_router())
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_buyer)
                        .push(buyer_router()),
                )
                .push(
                    Router::new()
                        .hoop(auth::middleware::require_admin)
                        .push(admin_router()),
                ),
        )
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("auth")
                .push(Router::with_path("register").post(auth::register::handler))
                .push(Router::with_path("login").post(auth::login::handler))
                .push(Router::with_path("verify").post(auth::verify::handler)),
        )
        .push(
            Router::with_path("produk")
                .get(products::index::handler)
                .push(Router::with_path("slug/{slug}").get(products::slug::handler))
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
}

fn authenticated_router() -> Router {
    Router::new()
        .push(
            Router::with_path("profile")
                .get(profile::get::handler)
                .put(profile::update::handler)
                .delete(profile::delete::handler),
        )
        .push(Router::with_path("dashboard").get(dashboard::handler))
        .push(
            Router::with_path("keranjang")
                .get(carts::get::handler)
                .post(carts::add::handler)
                .push(Router::with_path("deleteproduct").post(carts::remove::handler)),
        )
        .push(product_list_router("favorite").hoop(product_lists::favorite))
        .push(product_list_router("wishlist").hoop(product_lists::wishlist))
        .push(Router::with_path("transaksi").get(transactions::history::handler))
}

fn product_list_router(path: &str) -> Router {
    Router::with_path(path)
        .get(product_lists::get::handler)
        .post(product_lists::add::handler)
        .push(Router::with_path("deleteproduct").post(product_lists::remove::handler))
}

fn buyer_router() -> Router {
    Router::with_path("transaksi")
        .post(transactions::purchase::handler)
        .push(Router::with_path("keranjang").post(transactions::checkout_cart::handler))
}

fn admin_router() -> Router {
    Router::new()
        .push(
            Router::with_path("produk")
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(Router::with_path("topup").post(balances::top_up::handler))
        .push(
            Router::with_path("warunk")
                .post(warunks::create::handler)
                .push(Router::with_path("{warunk}").get(warunks::get::handler)),
        )
        .push(Router::with_path("admin/transaksi").get(transactions::index::handler))
        .push(
            Router::with_path("admin/users")
                .get(users::index::handler)
                .push(Router::with_path("{user}").get(users::get::handler)),
        )
}
