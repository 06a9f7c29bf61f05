//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository, load_cart},
        orders::{
            data::PlaceOrder,
            errors::OrdersServiceError,
            pricing::price_cart,
            records::{OrderRecord, OrderStatus, OrderUuid},
            repositories::{NewOrderRow, PgOrderItemsRepository, PgOrdersRepository},
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
        users::records::{Role, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }

    /// Settle an order the caller already placed under `order`.
    ///
    /// Returns `Ok(false)` when no order has that UUID yet.
    async fn resume_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<bool, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let owner = self.orders_repository.find_order_owner(&mut tx, order).await?;

        match owner {
            None => return Ok(false),
            Some(owner) if owner != user => return Err(OrdersServiceError::AlreadyExists),
            Some(_) => {}
        }

        self.orders_repository.settle_payment(&mut tx, order).await?;

        tx.commit().await?;

        debug!(%order, "resumed existing order");

        Ok(true)
    }

    /// Price the cart, store the pending order and empty the cart, all in one transaction.
    async fn create_pending_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        request: &PlaceOrder,
    ) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = load_cart(
            &self.carts_repository,
            &self.cart_items_repository,
            &mut tx,
            user,
        )
        .await?
        .filter(|cart| !cart.is_empty())
        .ok_or(OrdersServiceError::EmptyCart)?;

        let product_uuids: Vec<ProductUuid> =
            cart.items.iter().map(|line| line.product_uuid).collect();

        let products = self
            .products_repository
            .lock_products(&mut tx, &product_uuids)
            .await?;

        let priced = price_cart(&cart.items, &products)?;

        if let Some(expected) = request.expected_total
            && expected != priced.total
        {
            return Err(OrdersServiceError::TotalMismatch {
                expected,
                actual: priced.total,
            });
        }

        self.orders_repository
            .create_order(
                &mut tx,
                &NewOrderRow {
                    uuid: order,
                    user_uuid: user,
                    total_amount: priced.total,
                    shipping_address: &request.shipping_address,
                    payment_method: &request.payment_method,
                },
            )
            .await?;

        self.items_repository
            .create_items(&mut tx, order, &priced.lines)
            .await?;

        self.carts_repository
            .bump_version(&mut tx, user, Some(cart.version))
            .await?
            .ok_or(OrdersServiceError::Conflict)?;

        self.cart_items_repository
            .clear_items(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(priced.total)
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), OrdersServiceError> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut lines: FxHashMap<OrderUuid, Vec<_>> = FxHashMap::default();

        for owned in self.items_repository.list_items(tx, &uuids).await? {
            lines.entry(owned.order_uuid).or_default().push(owned.line);
        }

        for order in orders.iter_mut() {
            order.items = lines.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        user: UserUuid,
        request: PlaceOrder,
    ) -> Result<OrderUuid, OrdersServiceError> {
        let request = request.normalise()?;

        if let Some(order) = request.uuid
            && self.resume_order(user, order).await?
        {
            return Ok(order);
        }

        let order = request.uuid.unwrap_or_else(OrderUuid::new);

        let total = match self.create_pending_order(user, order, &request).await {
            Ok(total) => total,
            Err(OrdersServiceError::AlreadyExists) if request.uuid.is_some() => {
                // A concurrent retry with the same key got there first.
                if self.resume_order(user, order).await? {
                    return Ok(order);
                }

                return Err(OrdersServiceError::AlreadyExists);
            }
            Err(error) => return Err(error),
        };

        self.settle_payment(order).await?;

        info!(%order, %user, total, "order placed");

        Ok(order)
    }

    async fn settle_payment(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders_repository.settle_payment(&mut tx, order).await?;

        if rows_affected == 0
            && self
                .orders_repository
                .find_order_owner(&mut tx, order)
                .await?
                .is_none()
        {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_user_orders(&mut tx, user).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_all_orders(&self, actor: Role) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        if actor != Role::Admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let mut orders = self.orders_repository.list_all_orders(&mut tx).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        actor: Role,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if actor != Role::Admin {
            return Err(OrdersServiceError::Forbidden);
        }

        let status: OrderStatus = status.parse()?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .orders_repository
            .update_order_status(&mut tx, order, status)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let mut updated = vec![self.orders_repository.get_order(&mut tx, order).await?];

        self.attach_items(&mut tx, &mut updated).await?;

        tx.commit().await?;

        info!(%order, %status, "order status updated");

        updated.pop().ok_or(OrdersServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into a paid, confirmed order and empty the cart.
    async fn place_order(
        &self,
        user: UserUuid,
        request: PlaceOrder,
    ) -> Result<OrderUuid, OrdersServiceError>;

    /// Mark a pending order as paid and confirmed. Repeating the call changes nothing.
    async fn settle_payment(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// The user's orders, newest first, with product snapshots.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first, with customer details. Administrators only.
    async fn list_all_orders(&self, actor: Role) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Set an order's fulfilment status. Administrators only; any listed status is accepted.
    async fn update_order_status(
        &self,
        actor: Role,
        order: OrderUuid,
        status: &str,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
