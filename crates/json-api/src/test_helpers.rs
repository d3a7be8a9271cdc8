//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use storefront_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemId, CartItemRecord},
        },
        orders::{
            MockOrdersService,
            data::Address,
            records::{OrderId, OrderItemId, OrderItemRecord, OrderRecord},
            status::OrderStatus,
        },
        products::records::ProductId,
        users::records::UserId,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER: UserId = UserId::from_i64(1);
pub(crate) const TEST_ADMIN: UserId = UserId::from_i64(99);

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(Principal {
        user: TEST_USER,
        is_admin: false,
    });
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_principal(Principal {
        user: TEST_ADMIN,
        is_admin: true,
    });
    ctrl.call_next(req, depot, res).await;
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_active_orders().never();
    orders.expect_order_history().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();

    orders
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn state(orders: MockOrdersService, carts: MockCartsService, auth: MockAuthService) -> Arc<State> {
    State::shared(AppContext {
        orders: Arc::new(orders),
        carts: Arc::new(carts),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_orders_mock(), strict_carts_mock(), auth)
}

/// Service for customer order routes with an authenticated [`TEST_USER`].
pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(orders, strict_carts_mock(), strict_auth_mock())))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Service for admin routes with an authenticated [`TEST_ADMIN`].
pub(crate) fn admin_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(orders, strict_carts_mock(), strict_auth_mock())))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(strict_orders_mock(), carts, strict_auth_mock())))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn make_address(city: &str) -> Address {
    Address {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        address: "1 Main St".to_string(),
        city: city.to_string(),
        state: "TX".to_string(),
        zip_code: "73301".to_string(),
        country: "US".to_string(),
    }
}

pub(crate) fn make_order(id: i64, status: OrderStatus) -> OrderRecord {
    let order = OrderId::from_i64(id);

    OrderRecord {
        id: order,
        user: TEST_USER,
        status,
        subtotal: 2_497,
        shipping_cost: 500,
        tax: 200,
        total: 3_197,
        shipping: make_address("Austin"),
        billing: make_address("Austin"),
        items: vec![OrderItemRecord {
            id: OrderItemId::from_i64(id * 10),
            order,
            product: ProductId::from_i64(5),
            product_name: "Mug".to_string(),
            quantity: 2,
            price: 999,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(id: i64, product: i64, price: u64, quantity: u32) -> CartItemRecord {
    CartItemRecord {
        id: CartItemId::from_i64(id),
        product: ProductId::from_i64(product),
        product_name: format!("Product {product}"),
        price,
        stock: 10,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
