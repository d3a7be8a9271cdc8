//! Order Data

use crate::domain::products::records::ProductId;

/// A complete postal address. Used for shipping, where every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Billing address as submitted. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// Card details as submitted. The card number is masked and the CVV
/// discarded before anything is written.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvv: Option<String>,
    pub card_name: String,
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_number", &"<redacted>")
            .field("card_expiry", &self.card_expiry)
            .field("card_cvv", &self.card_cvv.as_ref().map(|_| "<redacted>"))
            .field("card_name", &self.card_name)
            .finish()
    }
}

/// New Order Item Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product: ProductId,
    pub quantity: u32,
    pub price: u64,
}

/// New Order Data
///
/// Money fields are minor units. `total` is taken as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shipping: Address,
    pub billing: BillingAddress,
    pub payment: PaymentDetails,
    pub items: Vec<NewOrderItem>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,
}
