//! Place Order Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use storefront_app::domain::orders::data::NewOrder;
use tracing::info;

use crate::{
    extensions::*,
    observability::record_order_placement,
    orders::{
        errors::into_placement_rejection,
        requests::PlaceOrderRequest,
        responses::OrderPlacementResponse,
    },
};

/// Place Order Handler
///
/// Places an order for the authenticated user from the submitted items,
/// decrementing stock and emptying the user's cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed", body = OrderPlacementResponse),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order or amount", body = OrderPlacementResponse),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock", body = OrderPlacementResponse),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Unknown product", body = OrderPlacementResponse),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error", body = OrderPlacementResponse),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderPlacementResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let principal = depot.principal_or_401()?;

    let order = match NewOrder::try_from(json.into_inner()) {
        Ok(order) => order,
        Err(error) => {
            record_order_placement("rejected");

            res.status_code(StatusCode::BAD_REQUEST);

            return Ok(Json(OrderPlacementResponse::rejected(error.to_string())));
        }
    };

    match state.app.orders.place_order(principal.user, order).await {
        Ok(order) => {
            info!(user = %principal.user, %order, "order placed via api");
            record_order_placement("placed");

            res.status_code(StatusCode::CREATED);

            Ok(Json(OrderPlacementResponse::placed(order.into_i64())))
        }
        Err(error) => {
            let rejection = into_placement_rejection(error);

            record_order_placement(if rejection.status.is_server_error() {
                "failed"
            } else {
                "rejected"
            });

            res.status_code(rejection.status);

            Ok(Json(OrderPlacementResponse::rejected(rejection.message)))
        }
    }
}
