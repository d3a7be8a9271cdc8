//! Update Order Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use storefront_app::domain::orders::{records::OrderId, status::OrderStatus};

use crate::{extensions::*, orders::errors::into_status_error};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of `processing`, `in_transit`, `out_for_delivery`, `delivered`
    pub status: String,
}

/// Update Order Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusResponse {
    pub success: bool,

    /// Status stored on the order
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order forward along the fulfilment chain. Moving backwards is
/// rejected.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid status"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an administrator"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Status would move backwards"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<i64>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateOrderStatusResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let admin = depot.admin_or_403()?;

    let order = OrderId::from_i64(order.into_inner());

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .map_err(|_ignored| StatusError::bad_request().brief("Invalid status"))?;

    let stored = state
        .app
        .orders
        .update_status(order, status)
        .await
        .map_err(into_status_error)?;

    info!(admin = %admin.user, %order, status = %stored, "order status updated");

    Ok(Json(UpdateOrderStatusResponse {
        success: true,
        status: stored.to_string(),
    }))
}
