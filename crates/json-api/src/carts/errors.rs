//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidReference => StatusError::not_found().brief("Product not found"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::InsufficientStock { product, available } => StatusError::conflict()
            .brief("Insufficient stock")
            .detail(format!("only {available} of product {product} in stock")),
        CartsServiceError::Sql(source) => {
            error!("cart request failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use storefront_app::domain::products::records::ProductId;

    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (CartsServiceError::NotFound, StatusCode::NOT_FOUND),
            (CartsServiceError::InvalidReference, StatusCode::NOT_FOUND),
            (CartsServiceError::InvalidQuantity, StatusCode::BAD_REQUEST),
            (
                CartsServiceError::InsufficientStock {
                    product: ProductId::from_i64(1),
                    available: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                CartsServiceError::Sql(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }
}
