//! Cart Data

use crate::domain::products::records::ProductId;

/// New Cart Item Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCartItem {
    pub product: ProductId,
    pub quantity: u32,
}
