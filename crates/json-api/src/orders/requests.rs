//! Order placement request payloads.
//!
//! String fields default to empty so that a missing field reaches order
//! validation and is reported by name rather than as a parse failure.
//! Amounts arrive as decimals (`9.99`) and become minor units here.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_app::{
    domain::{
        orders::data::{Address, BillingAddress, NewOrder, NewOrderItem, PaymentDetails},
        products::records::ProductId,
    },
    money::{self, MoneyError},
};

/// An amount in the request that cannot be stored as minor units.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} {source}")]
pub(crate) struct InvalidAmount {
    field: String,
    source: MoneyError,
}

fn minor_units(amount: Decimal, field: impl FnOnce() -> String) -> Result<u64, InvalidAmount> {
    money::to_minor_units(amount).map_err(|source| InvalidAmount {
        field: field(),
        source,
    })
}

/// Shipping address. Every field is required.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct AddressRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<AddressRequest> for Address {
    fn from(request: AddressRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            address: request.address,
            city: request.city,
            state: request.state,
            zip_code: request.zip_code,
            country: request.country,
        }
    }
}

/// Billing address. Absent or blank fields fall back to the shipping address.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct BillingAddressRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl From<BillingAddressRequest> for BillingAddress {
    fn from(request: BillingAddressRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            address: request.address,
            city: request.city,
            state: request.state,
            zip_code: request.zip_code,
            country: request.country,
        }
    }
}

/// Card details. The number is stored masked and the CVV is never stored.
#[derive(Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PaymentRequest {
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvv: Option<String>,
    pub card_name: String,
}

impl std::fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("card_expiry", &self.card_expiry)
            .field("card_name", &self.card_name)
            .finish_non_exhaustive()
    }
}

impl From<PaymentRequest> for PaymentDetails {
    fn from(request: PaymentRequest) -> Self {
        Self {
            card_number: request.card_number,
            card_expiry: request.card_expiry,
            card_cvv: request.card_cvv,
            card_name: request.card_name,
        }
    }
}

/// Order line
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,

    /// Unit price, at most two decimal places
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
}

/// Place Order Request
///
/// Amounts are decimals with at most two decimal places.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct PlaceOrderRequest {
    pub shipping: AddressRequest,
    pub billing: Option<BillingAddressRequest>,
    pub payment: PaymentRequest,
    pub items: Vec<OrderItemRequest>,
    #[salvo(schema(value_type = f64))]
    pub subtotal: Decimal,
    #[salvo(schema(value_type = f64))]
    pub shipping_cost: Decimal,
    #[salvo(schema(value_type = f64))]
    pub tax: Decimal,
    #[salvo(schema(value_type = f64))]
    pub total: Decimal,
}

impl TryFrom<PlaceOrderRequest> for NewOrder {
    type Error = InvalidAmount;

    fn try_from(request: PlaceOrderRequest) -> Result<Self, Self::Error> {
        let items = request
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(NewOrderItem {
                    product: ProductId::from_i64(item.product_id),
                    quantity: item.quantity,
                    price: minor_units(item.price, || format!("item {index} price"))?,
                })
            })
            .collect::<Result<Vec<_>, InvalidAmount>>()?;

        Ok(Self {
            shipping: request.shipping.into(),
            billing: request.billing.map(Into::into).unwrap_or_default(),
            payment: request.payment.into(),
            items,
            subtotal: minor_units(request.subtotal, || "subtotal".to_string())?,
            shipping_cost: minor_units(request.shipping_cost, || "shipping cost".to_string())?,
            tax: minor_units(request.tax, || "tax".to_string())?,
            total: minor_units(request.total, || "total".to_string())?,
        })
    }
}
