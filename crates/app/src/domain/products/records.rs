//! Product Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Product ID
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
///
/// `stock` is signed: the column carries no lower bound, so rows written
/// before guarded decrements existed may hold negative counts.
#[derive(Debug, Clone)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub stock: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
