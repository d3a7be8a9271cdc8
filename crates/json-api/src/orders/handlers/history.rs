//! Order History Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrdersResponse},
};

/// Order History Handler
///
/// Returns the authenticated user's delivered orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Delivered Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .order_history(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, status::OrderStatus};

    use crate::test_helpers::{TEST_USER, make_order, orders_service};

    use super::*;

    #[tokio::test]
    async fn test_lists_delivered_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_order_history()
            .once()
            .withf(|user| *user == TEST_USER)
            .return_once(|_| Ok(vec![make_order(9, OrderStatus::Delivered)]));

        let service = orders_service(orders, Router::with_path("orders/history").get(handler));

        let mut res = TestClient::get("http://example.com/orders/history")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.orders.len(), 1);

        let order = body.orders.first().ok_or("expected an order")?;
        let item = order.items.first().ok_or("expected an order item")?;

        assert_eq!(order.status, "delivered");
        assert_eq!(item.product_name, "Mug");

        Ok(())
    }

    #[tokio::test]
    async fn test_no_delivered_orders_returns_empty_list() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_order_history()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let service = orders_service(orders, Router::with_path("orders/history").get(handler));

        let mut res = TestClient::get("http://example.com/orders/history")
            .send(&service)
            .await;

        let body: OrdersResponse = res.take_json().await?;

        assert!(body.success);
        assert!(body.orders.is_empty());

        Ok(())
    }
}
