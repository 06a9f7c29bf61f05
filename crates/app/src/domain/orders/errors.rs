//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::products::records::ProductUuid;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("product {0} is out of stock")]
    ProductUnavailable(ProductUuid),

    #[error("order total changed: expected {expected}, actual {actual}")]
    TotalMismatch { expected: u64, actual: u64 },

    #[error("order total is too large")]
    AmountOverflow,

    #[error("shipping address is incomplete")]
    InvalidShippingAddress,

    #[error("payment method is invalid")]
    InvalidPaymentMethod,

    #[error("administrator role required")]
    Forbidden,

    #[error("invalid order status: {0}")]
    InvalidStatus(String),

    #[error("order not found")]
    NotFound,

    #[error("cart was modified during checkout")]
    Conflict,

    #[error("order already exists")]
    AlreadyExists,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
