//! Order input validation.
//!
//! Everything here runs before a transaction is opened, so a rejected order
//! never touches the database.

use thiserror::Error;

use crate::domain::{
    orders::{
        billing::resolve_billing,
        data::{Address, NewOrder},
        payment::{CVV_PLACEHOLDER, mask_card_number},
    },
    products::records::ProductId,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderValidationError {
    #[error("order must contain at least one item")]
    NoItems,

    #[error("item {index} quantity must be between 1 and {max}", max = i32::MAX)]
    InvalidQuantity { index: usize },

    #[error("item {index} price is out of range")]
    InvalidPrice { index: usize },

    #[error("shipping {0} is required")]
    MissingShippingField(&'static str),

    #[error("payment {0} is required")]
    MissingPaymentField(&'static str),

    #[error("{0} is out of range")]
    AmountOutOfRange(&'static str),
}

/// Order line ready for storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PreparedOrderItem {
    pub(crate) product: ProductId,
    pub(crate) quantity: i32,
    pub(crate) price: i64,
}

/// A validated order with billing resolved and payment data masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreparedOrder {
    pub(crate) shipping: Address,
    pub(crate) billing: Address,
    pub(crate) card_number: String,
    pub(crate) card_expiry: String,
    pub(crate) card_cvv: &'static str,
    pub(crate) card_name: String,
    pub(crate) items: Vec<PreparedOrderItem>,
    pub(crate) subtotal: i64,
    pub(crate) shipping_cost: i64,
    pub(crate) tax: i64,
    pub(crate) total: i64,
}

fn require(value: &str) -> bool {
    !value.trim().is_empty()
}

fn validate_shipping(shipping: &Address) -> Result<(), OrderValidationError> {
    let fields = [
        ("first name", &shipping.first_name),
        ("last name", &shipping.last_name),
        ("address", &shipping.address),
        ("city", &shipping.city),
        ("state", &shipping.state),
        ("zip code", &shipping.zip_code),
        ("country", &shipping.country),
    ];

    for (name, value) in fields {
        if !require(value) {
            return Err(OrderValidationError::MissingShippingField(name));
        }
    }

    Ok(())
}

fn amount(value: u64, name: &'static str) -> Result<i64, OrderValidationError> {
    i64::try_from(value).map_err(|_| OrderValidationError::AmountOutOfRange(name))
}

impl TryFrom<NewOrder> for PreparedOrder {
    type Error = OrderValidationError;

    fn try_from(order: NewOrder) -> Result<Self, Self::Error> {
        if order.items.is_empty() {
            return Err(OrderValidationError::NoItems);
        }

        let items = order
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let quantity = i32::try_from(item.quantity)
                    .ok()
                    .filter(|quantity| *quantity >= 1)
                    .ok_or(OrderValidationError::InvalidQuantity { index })?;

                let price = i64::try_from(item.price)
                    .map_err(|_| OrderValidationError::InvalidPrice { index })?;

                Ok(PreparedOrderItem {
                    product: item.product,
                    quantity,
                    price,
                })
            })
            .collect::<Result<Vec<_>, OrderValidationError>>()?;

        validate_shipping(&order.shipping)?;

        let payment = &order.payment;

        if !require(&payment.card_number) {
            return Err(OrderValidationError::MissingPaymentField("card number"));
        }

        if !require(&payment.card_expiry) {
            return Err(OrderValidationError::MissingPaymentField("card expiry"));
        }

        if !require(&payment.card_name) {
            return Err(OrderValidationError::MissingPaymentField("card name"));
        }

        Ok(Self {
            billing: resolve_billing(&order.shipping, &order.billing),
            card_number: mask_card_number(&payment.card_number),
            card_expiry: payment.card_expiry.clone(),
            card_cvv: CVV_PLACEHOLDER,
            card_name: payment.card_name.clone(),
            items,
            subtotal: amount(order.subtotal, "subtotal")?,
            shipping_cost: amount(order.shipping_cost, "shipping cost")?,
            tax: amount(order.tax, "tax")?,
            total: amount(order.total, "total")?,
            shipping: order.shipping,
        })
    }
}
