//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    columns::{try_get_amount, try_get_quantity},
    domain::{
        orders::{
            records::{OrderId, OrderItemId, OrderItemRecord},
            validation::PreparedOrderItem,
        },
        products::records::ProductId,
    },
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        item: &PreparedOrderItem,
    ) -> Result<OrderItemId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_ORDER_ITEM_SQL)
            .bind(order.into_i64())
            .bind(item.product.into_i64())
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderItemId::from_i64(id))
    }

    /// Items of all the given orders, grouped by order and in insertion order.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderId],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let ids: Vec<i64> = orders.iter().copied().map(OrderId::into_i64).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(ids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderItemId::from_i64(row.try_get("id")?),
            order: OrderId::from_i64(row.try_get("order_id")?),
            product: ProductId::from_i64(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            price: try_get_amount(row, "price")?,
        })
    }
}
