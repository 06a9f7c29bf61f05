//! Logout Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{auth::into_status_error, extensions::*, state::State};

/// Logout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LogoutResponse {
    pub message: String,
}

/// Logout Handler
///
/// Revokes the session used to make the request.
#[endpoint(tags("auth"), summary = "Log Out", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LogoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    state
        .app
        .auth
        .logout(principal.session_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
