//! Order Items Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount, try_get_quantity},
    domain::{
        orders::{
            pricing::PricedLine,
            records::{OrderLineRecord, OrderUuid},
        },
        products::{records::ProductUuid, repository::try_get_summary},
    },
};

const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

/// Order line tagged with the order it belongs to.
#[derive(Debug, Clone)]
pub(crate) struct OwnedOrderLine {
    pub order_uuid: OrderUuid,
    pub line: OrderLineRecord,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every line of an order in one statement, keeping their order as `position`.
    pub(crate) async fn create_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[PricedLine],
    ) -> Result<u64, sqlx::Error> {
        let mut positions = Vec::with_capacity(lines.len());
        let mut products = Vec::with_capacity(lines.len());
        let mut quantities = Vec::with_capacity(lines.len());
        let mut unit_prices = Vec::with_capacity(lines.len());

        for (position, line) in lines.iter().enumerate() {
            positions.push(encode_int(position)?);
            products.push(line.product_uuid.into_uuid());
            quantities.push(encode_int(line.quantity)?);
            unit_prices.push(encode_amount(line.unit_price)?);
        }

        let rows_affected = query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(positions)
            .bind(products)
            .bind(quantities)
            .bind(unit_prices)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OwnedOrderLine>, sqlx::Error> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OwnedOrderLine>(LIST_ORDER_ITEMS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

fn encode_int<T>(value: T) -> Result<i32, sqlx::Error>
where
    i32: TryFrom<T, Error = std::num::TryFromIntError>,
{
    i32::try_from(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for OwnedOrderLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            line: OrderLineRecord {
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                quantity: try_get_quantity(row, "quantity")?,
                unit_price: try_get_amount(row, "unit_price")?,
                product: try_get_summary(row)?,
            },
        })
    }
}
