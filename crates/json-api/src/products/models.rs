//! Product Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::{
    data::ProductDetails,
    records::{ProductRecord, ProductSummary},
};

fn default_in_stock() -> bool {
    true
}

fn default_rating() -> f32 {
    4.5
}

/// Catalog fields accepted on create and update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductPayload {
    pub name: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub description: String,

    pub category: String,

    /// Price charged, in minor units
    pub price: u64,

    /// Reference price shown struck through, in minor units
    #[serde(default)]
    pub discount_price: Option<u64>,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    #[serde(default = "default_rating")]
    pub rating: f32,

    #[serde(default)]
    pub reviews: u32,
}

impl From<ProductPayload> for ProductDetails {
    fn from(payload: ProductPayload) -> Self {
        ProductDetails {
            name: payload.name,
            model: payload.model,
            image: payload.image,
            description: payload.description,
            category: payload.category,
            price: payload.price,
            discount_price: payload.discount_price,
            in_stock: payload.in_stock,
            rating: payload.rating,
            reviews: payload.reviews,
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub image: String,
    pub description: String,
    pub category: String,

    /// Price charged, in minor units
    pub price: u64,

    /// Reference price shown struck through, in minor units
    pub discount_price: Option<u64>,
    pub in_stock: bool,
    pub rating: f32,
    pub reviews: u32,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            id: product.uuid.into(),
            name: product.name,
            model: product.model,
            image: product.image,
            description: product.description,
            category: product.category,
            price: product.price,
            discount_price: product.discount_price,
            in_stock: product.in_stock,
            rating: product.rating,
            reviews: product.reviews,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Display snapshot of a product attached to cart and order lines
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductSummaryResponse {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub price: u64,
    pub discount_price: Option<u64>,
    pub in_stock: bool,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(product: ProductSummary) -> Self {
        Self {
            id: product.uuid.into(),
            name: product.name,
            image: product.image,
            price: product.price,
            discount_price: product.discount_price,
            in_stock: product.in_stock,
        }
    }
}
