//! Cart Data

use crate::domain::{carts::CartsServiceError, products::records::ProductUuid};

/// Largest quantity a single cart line can hold.
pub const MAX_LINE_QUANTITY: u32 = i32::MAX as u32;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Cart Item Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// Cart version the caller last saw; the update is refused if the cart has moved on.
    pub expected_version: Option<u64>,
}

/// Check that a line quantity is positive and fits the storage column.
///
/// # Errors
///
/// Returns [`CartsServiceError::InvalidQuantity`] otherwise.
pub fn check_quantity(quantity: u32) -> Result<i32, CartsServiceError> {
    i32::try_from(quantity)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or(CartsServiceError::InvalidQuantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(matches!(
            check_quantity(0),
            Err(CartsServiceError::InvalidQuantity)
        ));
    }

    #[test]
    fn quantity_beyond_column_range_is_rejected() {
        assert!(check_quantity(MAX_LINE_QUANTITY).is_ok());
        assert!(matches!(
            check_quantity(MAX_LINE_QUANTITY + 1),
            Err(CartsServiceError::InvalidQuantity)
        ));
    }
}
