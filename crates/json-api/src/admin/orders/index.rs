//! List All Orders Handler

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use storefront_app::{domain::orders::records::OrderSummaryRecord, money::from_minor_units};

use crate::{extensions::*, orders::errors::into_status_error};

/// Order summary for the admin listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSummaryResponse {
    pub id: i64,
    pub user_id: i64,
    pub status: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,

    /// Number of order lines
    pub items_count: u64,

    pub created_at: String,
}

impl From<OrderSummaryRecord> for OrderSummaryResponse {
    fn from(order: OrderSummaryRecord) -> Self {
        Self {
            id: order.id.into_i64(),
            user_id: order.user.into_i64(),
            status: order.status.to_string(),
            total: from_minor_units(order.total),
            items_count: order.items_count,
            created_at: order.created_at.to_string(),
        }
    }
}

/// Admin Orders Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderSummariesResponse {
    pub success: bool,
    pub orders: Vec<OrderSummaryResponse>,
}

/// List All Orders Handler
///
/// Returns every order in the store, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::FORBIDDEN, description = "Caller is not an administrator"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderSummariesResponse>, StatusError> {
    let state = depot.state_or_500()?;

    depot.admin_or_403()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderSummariesResponse {
        success: true,
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}
