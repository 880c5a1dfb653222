//! Test Helpers

use crate::{
    domain::{
        balances::{BalancesService, BalancesServiceError, models::TopUpReceipt},
        carts::{
            CartsService, CartsServiceError,
            models::{Cart, NewCartLine},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            models::{Registration, User, UserUuid},
        },
    },
    test::TestContext,
};

/// Registration with an `@example.com` address and the shared test password.
pub(crate) fn registration(username: &str) -> Registration {
    Registration {
        name: format!("Pengguna {username}"),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: "rahasia123".to_string(),
        password_confirm: "rahasia123".to_string(),
    }
}

pub(crate) async fn register_verified_user(
    ctx: &TestContext,
    username: &str,
) -> Result<User, UsersServiceError> {
    let user = ctx.users.register(registration(username)).await?;

    ctx.users.verify_account(user.activation_code).await
}

pub(crate) async fn create_admin(ctx: &TestContext) -> Result<User, UsersServiceError> {
    ctx.users.create_admin(registration("adminwarunk")).await
}

pub(crate) fn new_product(name: &str, price: u64, stock: u64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        detail: format!("{name} buatan rumahan"),
        price,
        stock,
        category: "makanan".to_string(),
        image: "https://img.example.com/produk.jpg".to_string(),
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: u64,
    stock: u64,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(new_product(name, price, stock))
        .await
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: u64,
) -> Result<Cart, CartsServiceError> {
    ctx.carts
        .upsert_line(user, NewCartLine { product, quantity })
        .await
}

pub(crate) async fn top_up(
    ctx: &TestContext,
    user: &User,
    amount: u64,
) -> Result<TopUpReceipt, BalancesServiceError> {
    ctx.balances.top_up(&user.email, amount).await
}
