//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::OrdersServiceError;

use crate::observability::CheckoutOutcome;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::ProductUnavailable(product) => {
            StatusError::conflict().brief(format!("Product {product} is out of stock"))
        }
        OrdersServiceError::TotalMismatch { expected, actual } => StatusError::conflict()
            .brief(format!("Order total changed from {expected} to {actual}")),
        OrdersServiceError::AmountOverflow => {
            StatusError::bad_request().brief("Order total is too large")
        }
        OrdersServiceError::InvalidShippingAddress => {
            StatusError::bad_request().brief("Shipping address is incomplete")
        }
        OrdersServiceError::InvalidPaymentMethod => {
            StatusError::bad_request().brief("Payment method is invalid")
        }
        OrdersServiceError::Forbidden => StatusError::forbidden().brief("Access denied"),
        OrdersServiceError::InvalidStatus(status) => {
            StatusError::bad_request().brief(format!("Invalid order status: {status}"))
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified during checkout")
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Checkout metric label for a failed checkout.
pub(crate) fn checkout_outcome(error: &OrdersServiceError) -> CheckoutOutcome {
    match error {
        OrdersServiceError::EmptyCart => CheckoutOutcome::EmptyCart,
        OrdersServiceError::ProductNotFound(_) => CheckoutOutcome::ProductNotFound,
        OrdersServiceError::ProductUnavailable(_) => CheckoutOutcome::ProductUnavailable,
        OrdersServiceError::TotalMismatch { .. } => CheckoutOutcome::TotalMismatch,
        OrdersServiceError::Conflict | OrdersServiceError::AlreadyExists => {
            CheckoutOutcome::Conflict
        }
        OrdersServiceError::Sql(_) => CheckoutOutcome::Error,
        _ => CheckoutOutcome::Rejected,
    }
}
