//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount},
    domain::{
        orders::records::{
            OrderCustomer, OrderRecord, OrderStatus, OrderUuid, ShippingAddress,
        },
        users::records::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const FIND_ORDER_OWNER_SQL: &str = include_str!("../sql/find_order_owner.sql");
const SETTLE_PAYMENT_SQL: &str = include_str!("../sql/settle_payment.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("../sql/list_user_orders.sql");
const LIST_ALL_ORDERS_SQL: &str = include_str!("../sql/list_all_orders.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");

/// Order header as inserted at checkout; statuses take their column defaults.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderRow<'a> {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub total_amount: u64,
    pub shipping_address: &'a ShippingAddress,
    pub payment_method: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrderRow<'_>,
    ) -> Result<(), sqlx::Error> {
        let address = order.shipping_address;

        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(encode_amount(order.total_amount)?)
            .bind(&address.name)
            .bind(&address.address)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.zip_code)
            .bind(&address.phone)
            .bind(order.payment_method)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_order_owner(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<UserUuid>, sqlx::Error> {
        let owner: Option<Uuid> = query_scalar(FIND_ORDER_OWNER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(owner.map(UserUuid::from_uuid))
    }

    /// Move a pending, processing order to paid and confirmed. Returns the rows changed.
    pub(crate) async fn settle_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SETTLE_PAYMENT_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_all_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ALL_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_status: String = row.try_get("payment_status")?;
        let order_status: String = row.try_get("order_status")?;

        let customer_name: Option<String> = row.try_get("customer_name")?;
        let customer_email: Option<String> = row.try_get("customer_email")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: Vec::new(),
            total_amount: try_get_amount(row, "total_amount")?,
            shipping_address: ShippingAddress {
                name: row.try_get("shipping_name")?,
                address: row.try_get("shipping_address")?,
                city: row.try_get("shipping_city")?,
                state: row.try_get("shipping_state")?,
                zip_code: row.try_get("shipping_zip_code")?,
                phone: row.try_get("shipping_phone")?,
            },
            payment_method: row.try_get("payment_method")?,
            payment_status: payment_status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "payment_status".to_string(),
                source: Box::new(e),
            })?,
            order_status: order_status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "order_status".to_string(),
                source: Box::new(e),
            })?,
            customer: customer_name
                .zip(customer_email)
                .map(|(name, email)| OrderCustomer { name, email }),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
