//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::Span;

use storefront_app::auth::Login;

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Login Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: String,
}

/// Login Handler
///
/// Opens a new session for an existing user.
#[endpoint(
    tags("auth"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::OK, description = "Logged in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.login", skip_all, fields(user_uuid = tracing::field::Empty))]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<LoginResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let issued = state
        .app
        .auth
        .login(Login {
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(into_status_error)?;

    Span::current().record("user_uuid", tracing::field::display(issued.user.uuid));

    Ok(Json(LoginResponse {
        user: issued.user.into(),
        token: issued.token,
        expires_at: issued.expires_at.to_string(),
    }))
}
