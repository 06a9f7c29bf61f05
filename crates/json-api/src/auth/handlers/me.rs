//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;

use storefront_app::domain::users::UsersServiceError;

use crate::{auth::UserResponse, extensions::*, state::State};

/// Current User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MeResponse {
    pub user: UserResponse,
}

/// Current User Handler
///
/// Returns the user the session belongs to.
#[endpoint(tags("auth"), summary = "Current User", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .get_user(principal.user_uuid)
        .await
        .map_err(|error| match error {
            UsersServiceError::NotFound => StatusError::unauthorized(),
            other => {
                error!("failed to load current user: {other}");

                StatusError::internal_server_error()
            }
        })?;

    Ok(Json(MeResponse { user: user.into() }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::users::records::Role;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, anonymous_service, make_user, user_service};

    use super::*;

    #[tokio::test]
    async fn test_me_returns_current_user() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|uuid| Ok(make_user(uuid, Role::User)));

        let mut res = TestClient::get("http://example.com/api/auth/me")
            .send(&user_service(
                mocks,
                Router::with_path("api/auth/me").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: MeResponse = res.take_json().await?;

        assert_eq!(body.user.id, TEST_USER_UUID.into_uuid());
        assert_eq!(body.user.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_me_without_principal_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_get_user().never();

        let res = TestClient::get("http://example.com/api/auth/me")
            .send(&anonymous_service(
                mocks,
                Router::with_path("api/auth/me").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
