//! Product Records

use jiff::Timestamp;

use crate::uuids::typed_uuid;

typed_uuid!(
    /// Product UUID
    ProductUuid
);

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub model: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub price: u64,
    pub discount_price: Option<u64>,
    pub in_stock: bool,
    pub rating: f32,
    pub reviews: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl ProductRecord {
    #[must_use]
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            uuid: self.uuid,
            name: self.name.clone(),
            image: self.image.clone(),
            price: self.price,
            discount_price: self.discount_price,
            in_stock: self.in_stock,
        }
    }
}

/// Display snapshot of a product, joined onto cart and order lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub uuid: ProductUuid,
    pub name: String,
    pub image: String,
    pub price: u64,
    pub discount_price: Option<u64>,
    pub in_stock: bool,
}
