//! Cart Records

use jiff::Timestamp;

use crate::{domain::products::records::ProductId, ids::TypedId};

/// Cart Item ID
pub type CartItemId = TypedId<CartItemRecord>;

/// Cart Item Record, joined with the product it refers to.
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub id: CartItemId,
    pub product: ProductId,
    pub product_name: String,
    pub price: u64,
    pub stock: i32,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

/// A user's cart.
#[derive(Debug, Clone, Default)]
pub struct CartRecord {
    pub items: Vec<CartItemRecord>,
}

impl CartRecord {
    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .map(CartItemRecord::line_total)
            .fold(0, u64::saturating_add)
    }
}
