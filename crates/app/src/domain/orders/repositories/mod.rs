//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{OwnedOrderLine, PgOrderItemsRepository};
pub(crate) use orders::{NewOrderRow, PgOrdersRepository};
