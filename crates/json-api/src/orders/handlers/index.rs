//! Order Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Order Index Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(tags("orders"), summary = "List Orders", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrdersServiceError, records::OrderUuid};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, user_service};

    use super::{super::tests::make_order, *};

    fn make_service(mocks: Mocks) -> Service {
        user_service(mocks, Router::with_path("api/orders").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_callers_orders() -> TestResult {
        let newer = OrderUuid::new();
        let older = OrderUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |user| Ok(vec![make_order(newer, user), make_order(older, user)]));

        let mut res = TestClient::get("http://example.com/api/orders")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(body[0]["id"], newer.to_string());
        assert_eq!(body[1]["id"], older.to_string());
        assert_eq!(body[0]["totalAmount"], 250);
        assert_eq!(body[0]["paymentStatus"], "paid");
        assert_eq!(body[0]["orderStatus"], "confirmed");
        assert_eq!(body[0]["items"][0]["price"], 100);
        assert_eq!(body[0]["shippingAddress"]["zipCode"], "62701");
        assert!(body[0].get("customer").is_none(), "customer is admin-only");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_without_orders_returns_empty_array() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/api/orders")
            .send(&make_service(mocks))
            .await;

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert!(body.is_empty(), "expected no orders");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_store_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .return_once(|_| Err(OrdersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/api/orders")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
