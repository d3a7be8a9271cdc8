//! Remove Cart Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use storefront_app::domain::carts::records::CartItemId;

use crate::{carts::errors::into_status_error, extensions::*};

/// Remove Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.state_or_500()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .carts
        .remove_item(principal.user, CartItemId::from_i64(item.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
