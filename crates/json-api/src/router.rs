//! App Router

use salvo::Router;

use crate::{
    auth::{self, middleware},
    carts, orders, products,
};

pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(auth_router())
        .push(products_router())
        .push(
            Router::new()
                .hoop(middleware::handler)
                .push(cart_router())
                .push(
                    Router::with_path("orders")
                        .post(orders::create::handler)
                        .get(orders::index::handler),
                )
                .push(admin_router()),
        )
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("signup").post(auth::signup::handler))
        .push(Router::with_path("login").post(auth::login::handler))
        .push(
            Router::new()
                .hoop(middleware::handler)
                .push(Router::with_path("me").get(auth::me::handler))
                .push(Router::with_path("logout").post(auth::logout::handler)),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(Router::with_path("{product}").get(products::get::handler))
        .push(
            Router::new()
                .hoop(middleware::handler)
                .hoop(middleware::require_admin)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .push(Router::with_path("add").post(carts::add::handler))
        .push(
            Router::with_path("{user_id}")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("item/{product_id}")
                        .patch(carts::update_item::handler)
                        .delete(carts::remove_item::handler),
                ),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin/orders")
        .hoop(middleware::require_admin)
        .get(orders::admin_index::handler)
        .push(Router::with_path("{order_id}").patch(orders::update_status::handler))
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, http::header::AUTHORIZATION, prelude::*, test::TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::{auth::AuthServiceError, domain::users::records::Role};

    use crate::test_helpers::{Mocks, test_principal};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_protected_routes_require_a_bearer_token() -> TestResult {
        let service = make_service(Mocks::default());

        let cart = TestClient::get(format!("http://example.com/api/cart/{}", Uuid::nil()))
            .send(&service)
            .await;
        let orders = TestClient::get("http://example.com/api/orders")
            .send(&service)
            .await;
        let create = TestClient::post("http://example.com/api/products")
            .send(&service)
            .await;

        assert_eq!(cart.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(orders.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(create.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_product_writes_require_admin() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .returning(|_| Ok(test_principal(Role::User)));

        mocks.products.expect_delete_product().never();

        let res = TestClient::delete(format!("http://example.com/api/products/{}", Uuid::nil()))
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_orders_require_admin() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .returning(|_| Ok(test_principal(Role::User)));

        mocks.orders.expect_list_all_orders().never();

        let res = TestClient::get("http://example.com/api/admin/orders")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_revoked_session_is_rejected() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .once()
            .returning(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::get("http://example.com/api/orders")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
