//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{CartItemUpdate, NewCartItem, check_quantity},
            errors::CartsServiceError,
            records::CartRecord,
            repositories::{PgCartItemsRepository, PgCartsRepository, load_cart},
        },
        products::records::ProductUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn read_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let cart = load_cart(&self.carts_repository, &self.items_repository, tx, user).await?;

        Ok(cart.unwrap_or_else(|| CartRecord::empty(user)))
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError> {
        let quantity = check_quantity(item.quantity)?;

        let mut tx = self.db.begin().await?;

        self.carts_repository.ensure_cart(&mut tx, user).await?;

        self.carts_repository
            .bump_version(&mut tx, user, None)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        self.items_repository
            .add_item(&mut tx, user, item.product_uuid, quantity)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn set_quantity(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartRecord, CartsServiceError> {
        let quantity = check_quantity(update.quantity)?;

        let mut tx = self.db.begin().await?;

        self.carts_repository.ensure_cart(&mut tx, user).await?;

        let version = self
            .carts_repository
            .bump_version(&mut tx, user, update.expected_version)
            .await?;

        if version.is_none() {
            debug!(
                expected_version = update.expected_version,
                "cart version mismatch"
            );

            return Err(CartsServiceError::Conflict);
        }

        self.items_repository
            .set_item(&mut tx, user, update.product_uuid, quantity)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.carts_repository
            .bump_version(&mut tx, user, None)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        self.items_repository
            .delete_item(&mut tx, user, product)
            .await?;

        let cart = self.read_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .carts_repository
            .bump_version(&mut tx, user, None)
            .await?
            .is_some()
        {
            self.items_repository.clear_items(&mut tx, user).await?;
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve a user's cart, or an empty one if they never had a cart.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add to the quantity of a product, creating the cart and line as needed.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Set a line to an exact quantity, creating the cart and line as needed.
    async fn set_quantity(
        &self,
        user: UserUuid,
        update: CartItemUpdate,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Remove a product's line. Removing a line that isn't there leaves the cart unchanged.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<CartRecord, CartsServiceError>;

    /// Empty a cart. A missing or already empty cart is not an error.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::data::{CartItemUpdate, MAX_LINE_QUANTITY, NewCartItem},
            products::{ProductsService, records::ProductUuid},
        },
        test::TestContext,
    };

    use super::*;

    fn add(product_uuid: ProductUuid, quantity: u32) -> NewCartItem {
        NewCartItem {
            product_uuid,
            quantity,
        }
    }

    #[tokio::test]
    async fn get_cart_without_cart_returns_synthetic_empty_cart() -> TestResult {
        let ctx = TestContext::new().await;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart, CartRecord::empty(ctx.user_uuid));

        Ok(())
    }

    #[tokio::test]
    async fn add_item_creates_cart_lazily() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        let cart = ctx.carts.add_item(ctx.user_uuid, add(lamp, 2)).await?;

        assert_eq!(cart.user_uuid, ctx.user_uuid);
        assert_eq!(cart.version, 1);
        assert_eq!(cart.quantity_of(lamp), Some(2));
        assert!(cart.created_at.is_some());

        let snapshot = cart.items[0].product.as_ref();

        assert_eq!(snapshot.map(|p| p.price), Some(1_000));
        assert_eq!(snapshot.map(|p| p.name.as_str()), Some("Desk Lamp"));

        Ok(())
    }

    #[tokio::test]
    async fn repeated_adds_sum_quantities() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        for quantity in [1, 3, 5] {
            ctx.carts.add_item(ctx.user_uuid, add(lamp, quantity)).await?;
        }

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.items.len(), 1, "lines must stay unique per product");
        assert_eq!(cart.quantity_of(lamp), Some(9));
        assert_eq!(cart.version, 3);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_do_not_lose_updates() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        let (a, b, c, d) = tokio::join!(
            ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)),
            ctx.carts.add_item(ctx.user_uuid, add(lamp, 2)),
            ctx.carts.add_item(ctx.user_uuid, add(lamp, 3)),
            ctx.carts.add_item(ctx.user_uuid, add(lamp, 4)),
        );

        a?;
        b?;
        c?;
        d?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.quantity_of(lamp), Some(10));
        assert_eq!(cart.version, 4);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_zero_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        let result = ctx.carts.add_item(ctx.user_uuid, add(lamp, 0)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_overflowing_line_quantity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.carts
            .add_item(ctx.user_uuid, add(lamp, MAX_LINE_QUANTITY))
            .await?;

        let result = ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.quantity_of(lamp), Some(MAX_LINE_QUANTITY));
        assert_eq!(cart.version, 1, "failed add must not bump the version");

        Ok(())
    }

    #[tokio::test]
    async fn add_item_with_unknown_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_item(ctx.user_uuid, add(ProductUuid::new(), 1))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_with_deleted_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.products.delete_product(lamp).await?;

        let result = ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_overwrites_existing_line() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 5)).await?;

        ctx.carts
            .set_quantity(
                ctx.user_uuid,
                CartItemUpdate {
                    product_uuid: lamp,
                    quantity: 2,
                    expected_version: None,
                },
            )
            .await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.quantity_of(lamp), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_creates_missing_cart_and_line() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        let cart = ctx
            .carts
            .set_quantity(
                ctx.user_uuid,
                CartItemUpdate {
                    product_uuid: lamp,
                    quantity: 4,
                    expected_version: None,
                },
            )
            .await?;

        assert_eq!(cart.quantity_of(lamp), Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_rejects_zero() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 5)).await?;

        let result = ctx
            .carts
            .set_quantity(
                ctx.user_uuid,
                CartItemUpdate {
                    product_uuid: lamp,
                    quantity: 0,
                    expected_version: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.quantity_of(lamp), Some(5));

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_with_stale_version_returns_conflict() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        let seen = ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await?;

        let result = ctx
            .carts
            .set_quantity(
                ctx.user_uuid,
                CartItemUpdate {
                    product_uuid: lamp,
                    quantity: 7,
                    expected_version: Some(seen.version),
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.quantity_of(lamp), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_with_current_version_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        let seen = ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await?;

        let cart = ctx
            .carts
            .set_quantity(
                ctx.user_uuid,
                CartItemUpdate {
                    product_uuid: lamp,
                    quantity: 7,
                    expected_version: Some(seen.version),
                },
            )
            .await?;

        assert_eq!(cart.quantity_of(lamp), Some(7));
        assert_eq!(cart.version, seen.version + 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_then_get_returns_empty_cart_and_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await?;

        let first = ctx.carts.remove_item(ctx.user_uuid, lamp).await?;
        let second = ctx.carts.remove_item(ctx.user_uuid, lamp).await?;

        assert!(first.is_empty());
        assert!(second.is_empty());

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(lamp), None);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_keeps_other_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;
        let chair = ctx.create_product("Chair", "furniture", 5_000).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await?;
        ctx.carts.add_item(ctx.user_uuid, add(chair, 2)).await?;

        let cart = ctx.carts.remove_item(ctx.user_uuid, lamp).await?;

        assert_eq!(cart.quantity_of(lamp), None);
        assert_eq!(cart.quantity_of(chair), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_without_cart_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.carts.remove_item(ctx.user_uuid, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn clear_cart_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.carts.clear_cart(ctx.user_uuid).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 3)).await?;

        ctx.carts.clear_cart(ctx.user_uuid).await?;
        ctx.carts.clear_cart(ctx.user_uuid).await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert!(cart.is_empty());
        assert!(cart.created_at.is_some(), "clearing empties the cart, it doesn't delete it");

        Ok(())
    }

    #[tokio::test]
    async fn deleted_product_line_has_no_snapshot() -> TestResult {
        let ctx = TestContext::new().await;
        let lamp = ctx.create_product("Desk Lamp", "lighting", 1_000).await?;

        ctx.carts.add_item(ctx.user_uuid, add(lamp, 1)).await?;
        ctx.products.delete_product(lamp).await?;

        let cart = ctx.carts.get_cart(ctx.user_uuid).await?;

        assert_eq!(cart.quantity_of(lamp), Some(1));
        assert!(cart.items[0].product.is_none());

        Ok(())
    }
}
