//! App Context

use std::{sync::Arc, time::Duration};

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    auth::{AuthService, JwtSecret, PgAuthService},
    database::{self, Db},
    domain::{
        balances::{BalancesService, PgBalancesService},
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService},
        product_lists::{PgProductListsService, ProductListsService},
        products::{PgProductsService, ProductsService},
        transactions::{PgTransactionsService, TransactionsService},
        users::{PgUsersService, UsersService},
        warunks::{PgWarunksService, WarunksService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Settings the services are built from.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub jwt_secret: JwtSecret,
    pub token_lifetime: SignedDuration,
    /// Upper bound on a single checkout call.
    pub checkout_deadline: Duration,
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
    pub products: Arc<dyn ProductsService>,
    pub balances: Arc<dyn BalancesService>,
    pub carts: Arc<dyn CartsService>,
    pub transactions: Arc<dyn TransactionsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub warunks: Arc<dyn WarunksService>,
    pub product_lists: Arc<dyn ProductListsService>,
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool), settings))
    }

    #[must_use]
    pub fn from_db(db: &Db, settings: AppSettings) -> Self {
        Self {
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(
                db.clone(),
                settings.jwt_secret,
                settings.token_lifetime,
            )),
            products: Arc::new(PgProductsService::new(db.clone())),
            balances: Arc::new(PgBalancesService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            transactions: Arc::new(PgTransactionsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(
                db.clone(),
                settings.checkout_deadline,
            )),
            warunks: Arc::new(PgWarunksService::new(db.clone())),
            product_lists: Arc::new(PgProductListsService::new(db.clone())),
        }
    }
}
