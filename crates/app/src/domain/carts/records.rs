//! Cart Records

use jiff::Timestamp;

use crate::domain::{
    products::records::{ProductSummary, ProductUuid},
    users::records::UserUuid,
};

/// Cart Record
///
/// A user without a stored cart reads as an empty cart at version 0 with no timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRecord {
    pub user_uuid: UserUuid,
    pub version: u64,
    pub items: Vec<CartLineRecord>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl CartRecord {
    #[must_use]
    pub fn empty(user_uuid: UserUuid) -> Self {
        Self {
            user_uuid,
            version: 0,
            items: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity held for `product`, if the cart has a line for it.
    #[must_use]
    pub fn quantity_of(&self, product: ProductUuid) -> Option<u32> {
        self.items
            .iter()
            .find(|line| line.product_uuid == product)
            .map(|line| line.quantity)
    }
}

/// Cart Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// Current catalog snapshot, `None` once the product has been deleted.
    pub product: Option<ProductSummary>,
}
