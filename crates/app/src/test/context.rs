//! Test context for service-level integration tests.

use std::time::Duration;

use jiff::SignedDuration;

use crate::{
    auth::{JwtSecret, PgAuthService},
    database::Db,
    domain::{
        balances::PgBalancesService, carts::PgCartsService, checkout::PgCheckoutService,
        product_lists::PgProductListsService, products::PgProductsService,
        transactions::PgTransactionsService, users::PgUsersService, warunks::PgWarunksService,
    },
};

use super::{TEST_JWT_SECRET, db::TestDb};

const CHECKOUT_DEADLINE: Duration = Duration::from_secs(10);

pub(crate) struct TestContext {
    pub db: TestDb,
    pub users: PgUsersService,
    pub auth: PgAuthService,
    pub products: PgProductsService,
    pub balances: PgBalancesService,
    pub carts: PgCartsService,
    pub transactions: PgTransactionsService,
    pub checkout: PgCheckoutService,
    pub warunks: PgWarunksService,
    pub product_lists: PgProductListsService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            users: PgUsersService::new(db.clone()),
            auth: PgAuthService::new(
                db.clone(),
                JwtSecret::new(TEST_JWT_SECRET),
                SignedDuration::from_mins(30),
            ),
            products: PgProductsService::new(db.clone()),
            balances: PgBalancesService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            transactions: PgTransactionsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone(), CHECKOUT_DEADLINE),
            warunks: PgWarunksService::new(db.clone()),
            product_lists: PgProductListsService::new(db),
            db: test_db,
        }
    }
}
