//! Billing address resolution.

use crate::domain::orders::data::{Address, BillingAddress};

fn field_or(billing: Option<&str>, shipping: &str) -> String {
    billing
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(shipping)
        .to_string()
}

/// Resolve each billing field independently, falling back to the matching
/// shipping field when the billing value is absent or blank.
#[must_use]
pub fn resolve_billing(shipping: &Address, billing: &BillingAddress) -> Address {
    Address {
        first_name: field_or(billing.first_name.as_deref(), &shipping.first_name),
        last_name: field_or(billing.last_name.as_deref(), &shipping.last_name),
        address: field_or(billing.address.as_deref(), &shipping.address),
        city: field_or(billing.city.as_deref(), &shipping.city),
        state: field_or(billing.state.as_deref(), &shipping.state),
        zip_code: field_or(billing.zip_code.as_deref(), &shipping.zip_code),
        country: field_or(billing.country.as_deref(), &shipping.country),
    }
}
