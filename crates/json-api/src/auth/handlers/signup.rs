//! Signup Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::Span;

use storefront_app::auth::Signup;

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
    state::State,
};

/// Signup Request
#[derive(Deserialize, ToSchema)]
pub(crate) struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<SignupRequest> for Signup {
    fn from(request: SignupRequest) -> Self {
        Signup {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Signup Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignupResponse {
    pub message: String,
    pub user: UserResponse,

    /// Bearer token for the new session
    pub token: String,

    /// When the session stops being accepted
    pub expires_at: String,
}

/// Signup Handler
///
/// Registers a user and opens a session for them.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid details or email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.signup", skip_all, fields(user_uuid = tracing::field::Empty))]
pub(crate) async fn handler(
    json: JsonBody<SignupRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SignupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let issued = state
        .app
        .auth
        .signup(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Span::current().record("user_uuid", tracing::field::display(issued.user.uuid));

    res.status_code(StatusCode::CREATED);

    Ok(Json(SignupResponse {
        message: "User created successfully".to_string(),
        user: issued.user.into(),
        token: issued.token,
        expires_at: issued.expires_at.to_string(),
    }))
}
