//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use warunk_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        balances::MockBalancesService,
        carts::MockCartsService,
        checkout::MockCheckoutService,
        product_lists::MockProductListsService,
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        transactions::MockTransactionsService,
        users::{
            MockUsersService,
            models::{Role, User, UserUuid},
        },
        warunks::MockWarunksService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::max());

pub(crate) const BUYER: Principal = Principal {
    user: TEST_USER_UUID,
    role: Role::User,
};

pub(crate) const ADMIN: Principal = Principal {
    user: TEST_ADMIN_UUID,
    role: Role::Admin,
};

/// Service mocks backing a test [`State`]. Any mock without expectations fails the test
/// when it is called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub users: MockUsersService,
    pub auth: MockAuthService,
    pub products: MockProductsService,
    pub balances: MockBalancesService,
    pub carts: MockCartsService,
    pub transactions: MockTransactionsService,
    pub checkout: MockCheckoutService,
    pub warunks: MockWarunksService,
    pub product_lists: MockProductListsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            balances: Arc::new(self.balances),
            carts: Arc::new(self.carts),
            transactions: Arc::new(self.transactions),
            checkout: Arc::new(self.checkout),
            warunks: Arc::new(self.warunks),
            product_lists: Arc::new(self.product_lists),
        })
    }

    /// Serve `route` without an authenticated caller.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as if the auth middleware had accepted `principal`.
    pub(crate) fn service_as(self, principal: Principal, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(InjectPrincipal(principal))
                .push(route),
        )
    }
}

struct InjectPrincipal(Principal);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn make_user(uuid: UserUuid) -> User {
    User {
        uuid,
        name: "Budi Santoso".to_string(),
        username: "budisantoso".to_string(),
        email: "budi@example.com".to_string(),
        password_hash: "$argon2id$stub".to_string(),
        role: Role::User,
        verified: true,
        activation_code: 123_456,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        slug: "kopi-susu".to_string(),
        name: "Kopi Susu".to_string(),
        detail: "Kopi susu gula aren".to_string(),
        price: 15_000,
        stock: 20,
        category: "minuman".to_string(),
        image: "https://img.example.com/kopi-susu.png".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
