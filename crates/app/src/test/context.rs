//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        carts::PgCartsService,
        orders::PgOrdersService,
        products::{
            PgProductsService, ProductsService, ProductsServiceError, data::NewProduct,
            records::ProductUuid,
        },
        users::{
            PgUsersService, UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserUuid},
        },
    },
};

use super::{
    TEST_USER_EMAIL,
    db::TestDb,
    helpers::{FakeTokenVerifier, product_details},
};

/// Lowest cost bcrypt accepts; keeps auth tests fast.
const TEST_BCRYPT_COST: u32 = 4;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub user_uuid: UserUuid,
    pub users: PgUsersService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let users = PgUsersService::new(db.clone());

        let user = users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: "Test Shopper".to_string(),
                email: TEST_USER_EMAIL.to_string(),
                password_hash: "$2b$04$not-a-real-hash".to_string(),
                role: Role::User,
            })
            .await
            .expect("Failed to create default test user");

        Self {
            user_uuid: user.uuid,
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            auth: PgAuthService::new(db, Arc::new(FakeTokenVerifier))
                .with_bcrypt_cost(TEST_BCRYPT_COST),
            users,
            db: test_db,
        }
    }

    /// Create a live, in-stock product.
    pub(crate) async fn create_product(
        &self,
        name: &str,
        category: &str,
        price: u64,
    ) -> Result<ProductUuid, ProductsServiceError> {
        let product = self
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details: product_details(name, category, price),
            })
            .await?;

        Ok(product.uuid)
    }

    /// Create another user with a placeholder password hash.
    pub(crate) async fn create_user(
        &self,
        email: &str,
        role: Role,
    ) -> Result<UserUuid, UsersServiceError> {
        let user = self
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                name: "Other Shopper".to_string(),
                email: email.to_string(),
                password_hash: "$2b$04$not-a-real-hash".to_string(),
                role,
            })
            .await?;

        Ok(user.uuid)
    }
}
