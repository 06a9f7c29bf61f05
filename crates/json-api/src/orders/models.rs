//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::orders::records::{
    OrderCustomer, OrderLineRecord, OrderRecord, ShippingAddress,
};

use crate::products::ProductSummaryResponse;

/// Shipping Address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShippingAddressPayload {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

impl From<ShippingAddress> for ShippingAddressPayload {
    fn from(address: ShippingAddress) -> Self {
        Self {
            name: address.name,
            address: address.address,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            phone: address.phone,
        }
    }
}

impl From<ShippingAddressPayload> for ShippingAddress {
    fn from(address: ShippingAddressPayload) -> Self {
        Self {
            name: address.name,
            address: address.address,
            city: address.city,
            state: address.state,
            zip_code: address.zip_code,
            phone: address.phone,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    pub id: Uuid,

    pub user_id: Uuid,

    pub items: Vec<OrderItemResponse>,

    /// Sum of line subtotals, in minor currency units
    pub total_amount: u64,

    pub shipping_address: ShippingAddressPayload,

    pub payment_method: String,

    /// `pending` or `paid`
    pub payment_status: String,

    /// `processing`, `confirmed`, `shipped`, `delivered` or `cancelled`
    pub order_status: String,

    /// Only present in administrative listings
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customer: Option<CustomerResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            id: order.uuid.into(),
            user_id: order.user_uuid.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            total_amount: order.total_amount,
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method,
            payment_status: order.payment_status.to_string(),
            order_status: order.order_status.to_string(),
            customer: order.customer.map(CustomerResponse::from),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderItemResponse {
    pub product_id: Uuid,

    pub quantity: u32,

    /// Unit price charged at checkout
    pub price: u64,

    /// Current catalog details, `null` once the product has been deleted
    pub product: Option<ProductSummaryResponse>,
}

impl From<OrderLineRecord> for OrderItemResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            product_id: line.product_uuid.into(),
            quantity: line.quantity,
            price: line.unit_price,
            product: line.product.map(Into::into),
        }
    }
}

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub email: String,
}

impl From<OrderCustomer> for CustomerResponse {
    fn from(customer: OrderCustomer) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
        }
    }
}
