//! Order Data

use crate::domain::orders::{
    OrdersServiceError,
    records::{OrderUuid, ShippingAddress},
};

/// Longest accepted payment method tag, in characters.
pub const MAX_PAYMENT_METHOD_CHARS: usize = 32;

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    /// Client-chosen identifier; retrying with the same value never creates a second order.
    pub uuid: Option<OrderUuid>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,

    /// Total the client displayed; checkout is refused if the server computes another.
    pub expected_total: Option<u64>,
}

impl PlaceOrder {
    /// Trim every free-text field and reject blanks.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersServiceError::InvalidShippingAddress`] or
    /// [`OrdersServiceError::InvalidPaymentMethod`].
    pub fn normalise(mut self) -> Result<Self, OrdersServiceError> {
        let address = &mut self.shipping_address;

        for field in [
            &mut address.name,
            &mut address.address,
            &mut address.city,
            &mut address.state,
            &mut address.zip_code,
            &mut address.phone,
        ] {
            let trimmed = field.trim();

            if trimmed.is_empty() {
                return Err(OrdersServiceError::InvalidShippingAddress);
            }

            *field = trimmed.to_string();
        }

        let method = self.payment_method.trim();

        if method.is_empty() || method.chars().count() > MAX_PAYMENT_METHOD_CHARS {
            return Err(OrdersServiceError::InvalidPaymentMethod);
        }

        self.payment_method = method.to_string();

        Ok(self)
    }
}
