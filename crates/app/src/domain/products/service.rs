//! Products service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductUpdate, category_filter},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let category = category_filter(category.as_deref());

        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products(&mut tx, category.as_deref())
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.details.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product.uuid, &product.details)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.details.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update.details)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves live products, newest first, optionally restricted to one category.
    async fn list_products(
        &self,
        category: Option<String>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the catalog fields of a live product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product. Carts and past orders keep referring to it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::data::{NewProduct, ProductUpdate},
        test::{TestContext, helpers::product_details},
    };

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        let product = ctx
            .products
            .create_product(NewProduct {
                uuid,
                details: product_details("Desk Lamp", "lighting", 999),
            })
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.category, "lighting");
        assert_eq!(product.price, 999);
        assert!(product.in_stock);
        assert!(product.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        let lamp = ctx.create_product("Desk Lamp", "lighting", 100).await?;
        let chair = ctx.create_product("Chair", "furniture", 200).await?;

        let lighting = ctx.products.list_products(Some("lighting".to_string())).await?;
        let everything = ctx.products.list_products(Some("all".to_string())).await?;
        let unfiltered = ctx.products.list_products(None).await?;

        let lighting: Vec<ProductUuid> = lighting.iter().map(|p| p.uuid).collect();

        assert_eq!(lighting, vec![lamp]);
        assert_eq!(everything.len(), 2);
        assert_eq!(unfiltered.len(), 2);
        assert!(unfiltered.iter().any(|p| p.uuid == chair));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_empty_when_none_created() -> TestResult {
        let ctx = TestContext::new().await;

        let products = ctx.products.list_products(None).await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_product_reflects_new_details() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ctx.create_product("Desk Lamp", "lighting", 500).await?;

        let mut details = product_details("Desk Lamp Pro", "lighting", 750);
        details.discount_price = Some(900);
        details.in_stock = false;

        let updated = ctx
            .products
            .update_product(uuid, ProductUpdate { details })
            .await?;

        assert_eq!(updated.uuid, uuid);
        assert_eq!(updated.name, "Desk Lamp Pro");
        assert_eq!(updated.price, 750);
        assert_eq!(updated.discount_price, Some(900));
        assert!(!updated.in_stock);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    details: product_details("Ghost", "misc", 100),
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_with_out_of_range_rating_is_rejected() {
        let ctx = TestContext::new().await;

        let mut details = product_details("Desk Lamp", "lighting", 100);
        details.rating = -1.0;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                details,
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ctx.create_product("Desk Lamp", "lighting", 300).await?;

        ctx.products.delete_product(uuid).await?;

        let result = ctx.products.get_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        assert!(ctx.products.list_products(None).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ctx.create_product("Desk Lamp", "lighting", 300).await?;

        ctx.products.delete_product(uuid).await?;

        let result = ctx.products.delete_product(uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = ProductUuid::new();

        ctx.products
            .create_product(NewProduct {
                uuid,
                details: product_details("Desk Lamp", "lighting", 100),
            })
            .await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                uuid,
                details: product_details("Desk Lamp", "lighting", 200),
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
