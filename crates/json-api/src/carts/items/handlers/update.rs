//! Update Cart Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::records::CartItemId;

use crate::{
    carts::{errors::into_status_error, responses::CartItemResponse},
    extensions::*,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity for the line
    pub quantity: u32,
}

/// Update Cart Item Handler
///
/// Replaces the quantity of one of the authenticated user's cart lines.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let principal = depot.principal_or_401()?;

    let item = state
        .app
        .carts
        .update_item(
            principal.user,
            CartItemId::from_i64(item.into_inner()),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{CartsServiceError, MockCartsService},
        products::records::ProductId,
    };

    use crate::test_helpers::{TEST_USER, carts_service, make_cart_item};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{item}").put(handler))
    }

    #[tokio::test]
    async fn test_update_item_returns_updated_line() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(|user, item, quantity| {
                *user == TEST_USER && *item == CartItemId::from_i64(4) && *quantity == 3
            })
            .return_once(|_, _, quantity| Ok(make_cart_item(4, 10, 999, quantity)));

        let mut res = TestClient::put("http://example.com/cart/items/4")
            .json(&json!({ "quantity": 3 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(body.id, 4);
        assert_eq!(body.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_or_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put("http://example.com/cart/items/99")
            .json(&json!({ "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_quantity_above_stock_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_update_item().once().return_once(|_, _, _| {
            Err(CartsServiceError::InsufficientStock {
                product: ProductId::from_i64(10),
                available: 2,
            })
        });

        let res = TestClient::put("http://example.com/cart/items/4")
            .json(&json!({ "quantity": 50 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
