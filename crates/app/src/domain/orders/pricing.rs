//! Server-side order pricing.
//!
//! Turns cart lines into order lines using the catalog's current prices. Nothing the client
//! sends about prices is consulted.

use rustc_hash::FxHashMap;

use crate::domain::{
    carts::records::CartLineRecord,
    orders::OrdersServiceError,
    products::records::{ProductRecord, ProductUuid},
};

/// Largest amount the `BIGINT` money columns can hold.
pub const MAX_AMOUNT: u64 = i64::MAX as u64;

/// Order line ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Priced order lines plus their exact total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub total: u64,
}

/// Price each cart line from `products`, keeping cart order.
///
/// # Errors
///
/// - [`OrdersServiceError::EmptyCart`] when there are no lines.
/// - [`OrdersServiceError::ProductNotFound`] when a product is missing or soft-deleted.
/// - [`OrdersServiceError::ProductUnavailable`] when a product is out of stock.
/// - [`OrdersServiceError::AmountOverflow`] when a subtotal or the total exceeds [`MAX_AMOUNT`].
pub fn price_cart(
    lines: &[CartLineRecord],
    products: &[ProductRecord],
) -> Result<PricedOrder, OrdersServiceError> {
    if lines.is_empty() {
        return Err(OrdersServiceError::EmptyCart);
    }

    let catalog: FxHashMap<ProductUuid, &ProductRecord> =
        products.iter().map(|product| (product.uuid, product)).collect();

    let mut priced = Vec::with_capacity(lines.len());
    let mut total: u64 = 0;

    for line in lines {
        let product = catalog
            .get(&line.product_uuid)
            .filter(|product| product.deleted_at.is_none())
            .ok_or(OrdersServiceError::ProductNotFound(line.product_uuid))?;

        if !product.in_stock {
            return Err(OrdersServiceError::ProductUnavailable(line.product_uuid));
        }

        let subtotal = product
            .price
            .checked_mul(u64::from(line.quantity))
            .filter(|subtotal| *subtotal <= MAX_AMOUNT)
            .ok_or(OrdersServiceError::AmountOverflow)?;

        total = total
            .checked_add(subtotal)
            .filter(|total| *total <= MAX_AMOUNT)
            .ok_or(OrdersServiceError::AmountOverflow)?;

        priced.push(PricedLine {
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            unit_price: product.price,
        });
    }

    Ok(PricedOrder {
        lines: priced,
        total,
    })
}
