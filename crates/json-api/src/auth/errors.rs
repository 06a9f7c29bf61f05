//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid credentials")
        }
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        AuthServiceError::EmailTaken => StatusError::bad_request().brief("Email already registered"),
        AuthServiceError::InvalidUser(source) => StatusError::bad_request().brief(source.to_string()),
        AuthServiceError::InvalidLifetime(source) => {
            error!("session lifetime out of range: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::OpenBao(source) => {
            error!("OpenBao error during authentication: {source}");

            StatusError::internal_server_error()
        }
    }
}
