//! Errors

use salvo::http::{StatusCode, StatusError};
use tracing::{error, warn};

use storefront_app::domain::orders::OrdersServiceError;

/// HTTP status and client-facing message for a failed placement.
#[derive(Debug)]
pub(crate) struct PlacementRejection {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl PlacementRejection {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

pub(crate) fn into_placement_rejection(error: OrdersServiceError) -> PlacementRejection {
    match error {
        OrdersServiceError::Validation(source) => {
            PlacementRejection::new(StatusCode::BAD_REQUEST, source.to_string())
        }
        OrdersServiceError::MissingRequiredData | OrdersServiceError::InvalidData => {
            PlacementRejection::new(StatusCode::BAD_REQUEST, "Invalid order payload")
        }
        OrdersServiceError::InsufficientStock { product } => {
            warn!(%product, "order rejected for insufficient stock");

            PlacementRejection::new(
                StatusCode::CONFLICT,
                format!("Insufficient stock for product {product}"),
            )
        }
        OrdersServiceError::InvalidReference => {
            PlacementRejection::new(StatusCode::UNPROCESSABLE_ENTITY, "Product not found")
        }
        error @ (OrdersServiceError::NotFound
        | OrdersServiceError::AlreadyExists
        | OrdersServiceError::InvalidTransition { .. }
        | OrdersServiceError::Sql(_)) => {
            error!("failed to create order: {error:?}");

            PlacementRejection::new(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create order")
        }
    }
}

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("Cannot move order from {from} to {to}"))
        }
        OrdersServiceError::Validation(source) => StatusError::bad_request().brief(source.to_string()),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order data"),
        error @ (OrdersServiceError::AlreadyExists
        | OrdersServiceError::InsufficientStock { .. }
        | OrdersServiceError::Sql(_)) => {
            error!("order request failed: {error:?}");

            StatusError::internal_server_error()
        }
    }
}
