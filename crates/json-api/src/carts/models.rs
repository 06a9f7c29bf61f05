//! Cart Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartLineRecord, CartRecord};

use crate::products::ProductSummaryResponse;

/// Cart Response
///
/// A user without a cart gets an empty one with version 0 and no timestamps.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The user owning the cart
    pub user_id: Uuid,

    /// Bumped on every change; send it back to detect concurrent edits
    pub version: u64,

    pub items: Vec<CartItemResponse>,

    pub created_at: Option<String>,

    pub updated_at: Option<String>,
}

impl From<CartRecord> for CartResponse {
    fn from(cart: CartRecord) -> Self {
        CartResponse {
            user_id: cart.user_uuid.into(),
            version: cart.version,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            created_at: cart.created_at.as_ref().map(ToString::to_string),
            updated_at: cart.updated_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartItemResponse {
    pub product_id: Uuid,

    pub quantity: u32,

    /// Current catalog details, `null` once the product has been deleted
    pub product: Option<ProductSummaryResponse>,
}

impl From<CartLineRecord> for CartItemResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            product_id: line.product_uuid.into(),
            quantity: line.quantity,
            product: line.product.map(Into::into),
        }
    }
}
