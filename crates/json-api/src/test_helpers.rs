//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use hireline_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        availability::MockAvailabilityService,
        invoices::MockInvoicesService,
        orders::MockOrdersService,
        products::MockProductsService,
        users::{MockUsersService, records::{Role, UserUuid}},
    },
};

use crate::state::State;

pub(crate) const TEST_CUSTOMER: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::nil()),
    role: Role::Customer,
};

pub(crate) const TEST_VENDOR: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    role: Role::Vendor,
};

pub(crate) const TEST_ADMIN: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(2)),
    role: Role::Admin,
};

/// App context where every service is an expectation-free mock: any call
/// not explicitly set up by the test panics.
fn mock_app() -> AppContext {
    AppContext {
        products: Arc::new(MockProductsService::new()),
        orders: Arc::new(MockOrdersService::new()),
        availability: Arc::new(MockAvailabilityService::new()),
        invoices: Arc::new(MockInvoicesService::new()),
        users: Arc::new(MockUsersService::new()),
        auth: Arc::new(MockAuthService::new()),
    }
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    let mut app = mock_app();
    app.products = Arc::new(products);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    let mut app = mock_app();
    app.orders = Arc::new(orders);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_availability(availability: MockAvailabilityService) -> Arc<State> {
    let mut app = mock_app();
    app.availability = Arc::new(availability);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_invoices(invoices: MockInvoicesService) -> Arc<State> {
    let mut app = mock_app();
    app.invoices = Arc::new(invoices);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_users(users: MockUsersService) -> Arc<State> {
    let mut app = mock_app();
    app.users = Arc::new(users);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    let mut app = mock_app();
    app.auth = Arc::new(auth);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_orders_and_invoices(
    orders: MockOrdersService,
    invoices: MockInvoicesService,
) -> Arc<State> {
    let mut app = mock_app();
    app.orders = Arc::new(orders);
    app.invoices = Arc::new(invoices);

    Arc::new(State::new(app))
}

pub(crate) fn state_with_products_and_invoices(
    products: MockProductsService,
    invoices: MockInvoicesService,
) -> Arc<State> {
    let mut app = mock_app();
    app.products = Arc::new(products);
    app.invoices = Arc::new(invoices);

    Arc::new(State::new(app))
}

/// Service for routes reachable without authentication.
pub(crate) fn public_service(route: Router, state: Arc<State>) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// Service with a pre-authenticated user, standing in for the auth
/// middleware having run.
pub(crate) fn service_with_user(
    route: Router,
    state: Arc<State>,
    user: AuthenticatedUser,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject(user))
            .push(route),
    )
}
