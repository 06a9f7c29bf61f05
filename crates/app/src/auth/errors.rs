//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    auth::{OpenBaoError, PasswordError, SessionTokenError},
    domain::users::UsersServiceError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session not found")]
    NotFound,

    #[error("email already registered")]
    EmailTaken,

    #[error("invalid user details")]
    InvalidUser(#[source] UsersServiceError),

    #[error("session lifetime is out of range")]
    InvalidLifetime(#[source] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[from] SessionTokenError),

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("OpenBao error")]
    OpenBao(#[from] OpenBaoError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::EmailTaken,
            UsersServiceError::Sql(error) => Self::Sql(error),
            other => Self::InvalidUser(other),
        }
    }
}
