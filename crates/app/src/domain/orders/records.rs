//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        orders::OrdersServiceError,
        products::records::{ProductSummary, ProductUuid},
        users::records::UserUuid,
    },
    uuids::typed_uuid,
};

typed_uuid!(
    /// Order UUID
    OrderUuid
);

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Processing,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrdersServiceError;

    /// Parses a status name, ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| OrdersServiceError::InvalidStatus(value.to_string()))
    }
}

/// Settlement state of an order's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = OrdersServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(OrdersServiceError::InvalidStatus(other.to_string())),
        }
    }
}

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub items: Vec<OrderLineRecord>,

    /// Sum of `unit_price * quantity` over `items`, in minor units.
    pub total_amount: u64,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,

    /// Owning user's contact details, only filled in for administrative listings.
    pub customer: Option<OrderCustomer>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderRecord {
    /// Recompute the total from the stored lines. `None` on overflow.
    #[must_use]
    pub fn lines_total(&self) -> Option<u64> {
        self.items.iter().try_fold(0_u64, |total, line| {
            line.unit_price
                .checked_mul(u64::from(line.quantity))
                .and_then(|subtotal| total.checked_add(subtotal))
        })
    }
}

/// Order Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    pub product_uuid: ProductUuid,
    pub quantity: u32,

    /// Price charged per unit when the order was placed.
    pub unit_price: u64,

    /// Current catalog snapshot for display; `None` once the product has been deleted.
    pub product: Option<ProductSummary>,
}

/// Customer details attached to administrative order listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCustomer {
    pub name: String,
    pub email: String,
}
