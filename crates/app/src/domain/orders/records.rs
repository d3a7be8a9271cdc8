//! Order Records

use jiff::Timestamp;

use crate::{
    domain::{
        orders::{data::Address, status::OrderStatus},
        products::records::ProductId,
        users::records::UserId,
    },
    ids::TypedId,
};

/// Order ID
pub type OrderId = TypedId<OrderRecord>;

/// Order Item ID
pub type OrderItemId = TypedId<OrderItemRecord>;

/// Order Record, as shown to the customer who placed it.
///
/// Payment fields are never read back out of storage.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user: UserId,
    pub status: OrderStatus,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total: u64,
    pub shipping: Address,
    pub billing: Address,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Order Item Record
#[derive(Debug, Clone)]
pub struct OrderItemRecord {
    pub id: OrderItemId,
    pub order: OrderId,
    pub product: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: u64,
}

/// One row of the administrative order listing.
#[derive(Debug, Clone)]
pub struct OrderSummaryRecord {
    pub id: OrderId,
    pub user: UserId,
    pub status: OrderStatus,
    pub total: u64,
    pub items_count: u64,
    pub created_at: Timestamp,
}
