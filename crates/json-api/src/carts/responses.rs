//! Cart response payloads.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::{
    domain::carts::records::{CartItemRecord, CartRecord},
    money::from_minor_units,
};

/// Cart line joined with its product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,

    /// Current unit price
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,

    /// Units currently in stock
    pub stock: i32,

    pub quantity: u32,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            id: item.id.into_i64(),
            product_id: item.product.into_i64(),
            product_name: item.product_name,
            price: from_minor_units(item.price),
            stock: item.stock,
            quantity: item.quantity,
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,

    /// Sum of line quantities
    pub total_items: u64,

    /// Sum of price times quantity
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub total_price: Decimal,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        let total_items = cart.total_quantity();
        let total_price = from_minor_units(cart.subtotal());

        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            total_items,
            total_price,
        }
    }
}
