//! Active Orders Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrdersResponse},
};

/// Active Orders Handler
///
/// Returns the authenticated user's orders that have not been delivered yet,
/// newest first.
#[endpoint(
    tags("orders"),
    summary = "List Active Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .active_orders(principal.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{MockOrdersService, OrdersServiceError, status::OrderStatus};

    use crate::test_helpers::{TEST_USER, make_order, orders_service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        orders_service(orders, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_lists_active_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_active_orders()
            .once()
            .withf(|user| *user == TEST_USER)
            .return_once(|_| {
                Ok(vec![
                    make_order(2, OrderStatus::InTransit),
                    make_order(1, OrderStatus::Processing),
                ])
            });

        let mut res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersResponse = res.take_json().await?;

        assert!(body.success);
        assert_eq!(
            body.orders.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![2, 1]
        );

        let newest = body.orders.first().ok_or("expected an order")?;

        assert_eq!(newest.status, "in_transit");
        assert_eq!(newest.total, Decimal::new(3_197, 2));
        assert_eq!(
            newest.items.first().map(|item| item.price),
            Some(Decimal::new(999, 2))
        );
        assert_eq!(newest.items.len(), 1);
        assert_eq!(newest.shipping.city, "Austin");

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_active_orders()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
