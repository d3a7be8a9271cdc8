//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    columns::try_get_amount,
    domain::{
        orders::{
            billing::resolve_billing,
            data::{Address, BillingAddress},
            records::{OrderId, OrderRecord, OrderSummaryRecord},
            status::OrderStatus,
            validation::PreparedOrder,
        },
        users::records::UserId,
    },
};

use super::try_get_status;

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("../sql/list_user_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const LOCK_ORDER_STATUS_SQL: &str = include_str!("../sql/lock_order_status.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the order header in the `processing` status.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        order: &PreparedOrder,
    ) -> Result<OrderId, sqlx::Error> {
        let shipping = &order.shipping;
        let billing = &order.billing;

        let id: i64 = query_scalar(CREATE_ORDER_SQL)
            .bind(user.into_i64())
            .bind(OrderStatus::Processing.as_str())
            .bind(order.subtotal)
            .bind(order.shipping_cost)
            .bind(order.tax)
            .bind(order.total)
            .bind(&shipping.first_name)
            .bind(&shipping.last_name)
            .bind(&shipping.address)
            .bind(&shipping.city)
            .bind(&shipping.state)
            .bind(&shipping.zip_code)
            .bind(&shipping.country)
            .bind(&billing.first_name)
            .bind(&billing.last_name)
            .bind(&billing.address)
            .bind(&billing.city)
            .bind(&billing.state)
            .bind(&billing.zip_code)
            .bind(&billing.country)
            .bind(&order.card_number)
            .bind(&order.card_expiry)
            .bind(order.card_cvv)
            .bind(&order.card_name)
            .fetch_one(&mut **tx)
            .await?;

        Ok(OrderId::from_i64(id))
    }

    /// The user's orders in any of `statuses`, newest first, without items.
    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let statuses: Vec<String> = statuses
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();

        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_i64())
            .bind(statuses)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, OrderSummaryRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Reads the order's status and locks the row until the transaction ends.
    pub(crate) async fn lock_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
    ) -> Result<OrderStatus, sqlx::Error> {
        let row = query(LOCK_ORDER_STATUS_SQL)
            .bind(order.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        try_get_status(&row, "status")
    }

    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_i64())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let shipping = Address {
            first_name: row.try_get("shipping_first_name")?,
            last_name: row.try_get("shipping_last_name")?,
            address: row.try_get("shipping_address")?,
            city: row.try_get("shipping_city")?,
            state: row.try_get("shipping_state")?,
            zip_code: row.try_get("shipping_zip_code")?,
            country: row.try_get("shipping_country")?,
        };

        // Billing columns are nullable; fill gaps from shipping the same way
        // they are filled on insert.
        let billing = BillingAddress {
            first_name: row.try_get("billing_first_name")?,
            last_name: row.try_get("billing_last_name")?,
            address: row.try_get("billing_address")?,
            city: row.try_get("billing_city")?,
            state: row.try_get("billing_state")?,
            zip_code: row.try_get("billing_zip_code")?,
            country: row.try_get("billing_country")?,
        };

        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            user: UserId::from_i64(row.try_get("user_id")?),
            status: try_get_status(row, "status")?,
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_cost: try_get_amount(row, "shipping_cost")?,
            tax: try_get_amount(row, "tax")?,
            total: try_get_amount(row, "total")?,
            billing: resolve_billing(&shipping, &billing),
            shipping,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let items_count: i64 = row.try_get("items_count")?;

        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            user: UserId::from_i64(row.try_get("user_id")?),
            status: try_get_status(row, "status")?,
            total: try_get_amount(row, "total")?,
            items_count: u64::try_from(items_count).map_err(|e| sqlx::Error::ColumnDecode {
                index: "items_count".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
