//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemId, CartItemRecord, CartRecord},
            repository::PgCartItemsRepository,
        },
        products::{records::ProductId, repository::PgProductsRepository},
        users::records::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

/// Quantities must be positive and fit the `INTEGER` column.
fn checked_quantity(quantity: u32) -> Result<i32, CartsServiceError> {
    i32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or(CartsServiceError::InvalidQuantity)
}

fn ensure_in_stock(
    product: ProductId,
    requested: i32,
    available: i32,
) -> Result<(), CartsServiceError> {
    if requested > available {
        return Err(CartsServiceError::InsufficientStock { product, available });
    }

    Ok(())
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.items_repository.list_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(CartRecord { items })
    }

    async fn add_item(
        &self,
        user: UserId,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let quantity = checked_quantity(item.quantity)?;

        let mut tx = self.db.begin().await?;

        let available = self
            .products_repository
            .get_product_stock(&mut tx, item.product)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        let existing = self
            .items_repository
            .get_item_quantity(&mut tx, user, item.product)
            .await?
            .unwrap_or(0);

        let requested = existing
            .checked_add(quantity)
            .ok_or(CartsServiceError::InvalidQuantity)?;

        ensure_in_stock(item.product, requested, available)?;

        let id = self
            .items_repository
            .upsert_item(&mut tx, user, item.product, quantity)
            .await?;

        let stored = self.items_repository.get_item(&mut tx, user, id).await?;

        tx.commit().await?;

        Ok(stored)
    }

    async fn update_item(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let quantity = checked_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let current = self.items_repository.get_item(&mut tx, user, item).await?;

        let available = self
            .products_repository
            .get_product_stock(&mut tx, current.product)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        ensure_in_stock(current.product, quantity, available)?;

        let rows_affected = self
            .items_repository
            .update_quantity(&mut tx, user, item, quantity)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        let stored = self.items_repository.get_item(&mut tx, user, item).await?;

        tx.commit().await?;

        Ok(stored)
    }

    async fn remove_item(&self, user: UserId, item: CartItemId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.items_repository.delete_item(&mut tx, user, item).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserId) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.items_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with product details for every line.
    async fn get_cart(&self, user: UserId) -> Result<CartRecord, CartsServiceError>;

    /// Add a product to the cart. Adding a product that is already in the
    /// cart increases the existing line's quantity. The resulting quantity
    /// may not exceed the product's stock.
    async fn add_item(
        &self,
        user: UserId,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Replace the quantity of an existing cart line.
    async fn update_item(
        &self,
        user: UserId,
        item: CartItemId,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove a single line from the cart.
    async fn remove_item(&self, user: UserId, item: CartItemId) -> Result<(), CartsServiceError>;

    /// Remove every line from the cart, returning the number removed.
    async fn clear_cart(&self, user: UserId) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn add_item_creates_cart_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-add@example.com").await;
        let product = ctx.create_product("Notebook", 450, 10).await;

        let item = ctx
            .carts
            .add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(item.product, product);
        assert_eq!(item.product_name, "Notebook");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 450);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_twice_merges_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-merge@example.com").await;
        let product = ctx.create_product("Pen", 120, 10).await;

        let first = ctx.add_to_cart(user, product, 2).await;
        let second = ctx.add_to_cart(user, product, 3).await;

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(first, second, "merged line should keep its id");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_adds_of_new_line_keep_both_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-race@example.com").await;
        let product = ctx.create_product("Marker", 180, 10).await;

        let (a, b) = tokio::join!(
            ctx.carts.add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 2,
                },
            ),
            ctx.carts.add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 3,
                },
            ),
        );

        let (a, b) = (a?, b?);
        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(a.id, b.id, "both adds should land on one line");
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_quantity(), 5);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_adds_cannot_exceed_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-race-short@example.com").await;
        let product = ctx.create_product("Lamp", 4_000, 3).await;

        let (a, b) = tokio::join!(
            ctx.carts.add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 2,
                },
            ),
            ctx.carts.add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 2,
                },
            ),
        );

        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "exactly one add should fit: {a:?} / {b:?}"
        );
        assert_eq!(ctx.carts.get_cart(user).await?.total_quantity(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_beyond_stock_returns_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-short@example.com").await;
        let product = ctx.create_product("Rare Vinyl", 5_000, 2).await;

        ctx.add_to_cart(user, product, 2).await;

        let result = ctx
            .carts
            .add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock { available: 2, .. })
            ),
            "expected InsufficientStock, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user).await?;
        assert_eq!(cart.items[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_invalid_reference() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-unknown@example.com").await;

        let result = ctx
            .carts
            .add_item(
                user,
                NewCartItem {
                    product: ProductId::from_i64(i64::MAX),
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_item_zero_quantity_is_rejected() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-zero@example.com").await;
        let product = ctx.create_product("Eraser", 50, 10).await;

        let result = ctx
            .carts
            .add_item(
                user,
                NewCartItem {
                    product,
                    quantity: 0,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_replaces_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-update@example.com").await;
        let product = ctx.create_product("Stapler", 900, 10).await;
        let item = ctx.add_to_cart(user, product, 1).await;

        let updated = ctx.carts.update_item(user, item, 7).await?;

        assert_eq!(updated.id, item);
        assert_eq!(updated.quantity, 7);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_beyond_stock_returns_insufficient_stock() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-update-short@example.com").await;
        let product = ctx.create_product("Globe", 3_200, 3).await;
        let item = ctx.add_to_cart(user, product, 1).await;

        let result = ctx.carts.update_item(user, item, 4).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::InsufficientStock { available: 3, .. })
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_of_other_user_returns_not_found() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("cart-owner@example.com").await;
        let other = ctx.create_user("cart-other@example.com").await;
        let product = ctx.create_product("Ruler", 150, 10).await;
        let item = ctx.add_to_cart(owner, product, 1).await;

        let result = ctx.carts.update_item(other, item, 2).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn remove_item_deletes_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-remove@example.com").await;
        let keep = ctx.create_product("Folder", 300, 10).await;
        let binder = ctx.create_product("Binder", 700, 10).await;

        ctx.add_to_cart(user, keep, 1).await;
        let item = ctx.add_to_cart(user, binder, 1).await;

        ctx.carts.remove_item(user, item).await?;

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product, keep);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_unknown_returns_not_found() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-remove-missing@example.com").await;

        let result = ctx
            .carts
            .remove_item(user, CartItemId::from_i64(i64::MAX))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clear_cart_removes_only_that_users_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-clear@example.com").await;
        let other = ctx.create_user("cart-clear-other@example.com").await;
        let product = ctx.create_product("Tape", 200, 20).await;
        let second = ctx.create_product("Glue", 250, 20).await;

        ctx.add_to_cart(user, product, 1).await;
        ctx.add_to_cart(user, second, 1).await;
        ctx.add_to_cart(other, product, 1).await;

        let removed = ctx.carts.clear_cart(user).await?;

        assert_eq!(removed, 2);
        assert!(ctx.carts.get_cart(user).await?.items.is_empty());
        assert_eq!(ctx.carts.get_cart(other).await?.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn get_cart_reports_totals() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("cart-totals@example.com").await;
        let a = ctx.create_product("Cup", 400, 10).await;
        let b = ctx.create_product("Saucer", 250, 10).await;

        ctx.add_to_cart(user, a, 2).await;
        ctx.add_to_cart(user, b, 1).await;

        let cart = ctx.carts.get_cart(user).await?;

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), 1_050);

        Ok(())
    }
}
