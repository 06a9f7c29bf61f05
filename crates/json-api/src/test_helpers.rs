//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_SESSION_UUID: Uuid = Uuid::from_u128(1);
pub(crate) const OTHER_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));

/// One mock per service. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub auth: MockAuthService,
    pub users: MockUsersService,
    pub products: MockProductsService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
        })
    }
}

#[salvo::handler]
async fn inject_user(req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
    depot.insert_principal(test_principal(Role::User));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(test_principal(Role::Admin));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn test_principal(role: Role) -> Principal {
    Principal {
        user_uuid: TEST_USER_UUID,
        session_uuid: TEST_SESSION_UUID,
        role,
    }
}

/// Serve `route` without an authenticated caller.
pub(crate) fn anonymous_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// Serve `route` as [`TEST_USER_UUID`] with the user role.
pub(crate) fn user_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

/// Serve `route` as [`TEST_USER_UUID`] with the admin role.
pub(crate) fn admin_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> UserRecord {
    UserRecord {
        uuid,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Headphones".to_string(),
        model: "HX-1".to_string(),
        image: "https://cdn.example.com/hx-1.png".to_string(),
        description: "Closed-back headphones".to_string(),
        category: "audio".to_string(),
        price: 100,
        discount_price: Some(150),
        in_stock: true,
        rating: 4.5,
        reviews: 12,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
