//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::repository::PgCartItemsRepository,
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderId, OrderItemRecord, OrderRecord, OrderSummaryRecord},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            status::{ACTIVE_STATUSES, OrderStatus},
            validation::PreparedOrder,
        },
        products::repository::PgProductsRepository,
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    products_repository: PgProductsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn user_orders(
        &self,
        user: UserId,
        statuses: &[OrderStatus],
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_user_orders(&mut tx, user, statuses)
            .await?;

        let ids: Vec<OrderId> = orders.iter().map(|order| order.id).collect();

        let items = if ids.is_empty() {
            Vec::new()
        } else {
            self.items_repository.list_order_items(&mut tx, &ids).await?
        };

        tx.commit().await?;

        Ok(attach_items(orders, items))
    }
}

fn attach_items(mut orders: Vec<OrderRecord>, items: Vec<OrderItemRecord>) -> Vec<OrderRecord> {
    let positions: HashMap<OrderId, usize> = orders
        .iter()
        .enumerate()
        .map(|(index, order)| (order.id, index))
        .collect();

    for item in items {
        if let Some(&index) = positions.get(&item.order) {
            orders[index].items.push(item);
        }
    }

    orders
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.place_order",
        skip(self, order),
        fields(user_id = %user, items = order.items.len()),
        err
    )]
    async fn place_order(&self, user: UserId, order: NewOrder) -> Result<OrderId, OrdersServiceError> {
        let order = PreparedOrder::try_from(order)?;

        let mut tx = self.db.begin().await?;

        let order_id = self
            .orders_repository
            .create_order(&mut tx, user, &order)
            .await?;

        for item in &order.items {
            self.items_repository
                .create_order_item(&mut tx, order_id, item)
                .await?;

            let decremented = self
                .products_repository
                .decrement_stock(&mut tx, item.product, item.quantity)
                .await?;

            if decremented == 0 {
                warn!(product_id = %item.product, quantity = item.quantity, "insufficient stock");

                return Err(OrdersServiceError::InsufficientStock {
                    product: item.product,
                });
            }
        }

        let cleared = self
            .cart_items_repository
            .clear_cart(&mut tx, user)
            .await?;

        tx.commit().await?;

        info!(order_id = %order_id, cart_items_cleared = cleared, "order placed");

        Ok(order_id)
    }

    async fn active_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.user_orders(user, &ACTIVE_STATUSES).await
    }

    async fn order_history(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.user_orders(user, &[OrderStatus::Delivered]).await
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummaryRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(name = "orders.update_status", skip(self), fields(order_id = %order, status = %status), err)]
    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_order_status(&mut tx, order)
            .await?;

        if !current.can_transition_to(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current,
                to: status,
            });
        }

        let rows_affected = self
            .orders_repository
            .update_status(&mut tx, order, status)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(from = %current, "order status updated");

        Ok(status)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place an order for `user`.
    ///
    /// In one transaction: inserts the order and its items, decrements stock
    /// for every item, and clears the user's cart. Any failure rolls all of
    /// it back. Stock is only decremented while enough remains; otherwise the
    /// order fails with [`OrdersServiceError::InsufficientStock`].
    async fn place_order(&self, user: UserId, order: NewOrder) -> Result<OrderId, OrdersServiceError>;

    /// The user's orders that are not yet delivered, newest first.
    async fn active_orders(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// The user's delivered orders, newest first.
    async fn order_history(&self, user: UserId) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderSummaryRecord>, OrdersServiceError>;

    /// Move an order forward along the status chain.
    async fn update_status(
        &self,
        order: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrdersServiceError>;
}
