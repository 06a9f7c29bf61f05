//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    postgres::{PgArguments, PgRow},
    query,
    query::QueryAs,
    query_as,
};
use uuid::Uuid;

use crate::{
    database::{encode_amount, try_get_amount, try_get_optional_amount},
    domain::products::{
        data::ProductDetails,
        records::{ProductRecord, ProductSummary, ProductUuid},
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LOCK_PRODUCTS_SQL: &str = include_str!("sql/lock_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

type ProductQuery<'q> = QueryAs<'q, Postgres, ProductRecord, PgArguments>;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<&str>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch products by UUID, including soft-deleted ones, holding a share lock until commit.
    pub(crate) async fn lock_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|p| p.into_uuid()).collect();

        query_as::<Postgres, ProductRecord>(LOCK_PRODUCTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: &ProductDetails,
    ) -> Result<ProductRecord, sqlx::Error> {
        let query = query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL).bind(product.into_uuid());

        bind_details(query, details)?.fetch_one(&mut **tx).await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: &ProductDetails,
    ) -> Result<ProductRecord, sqlx::Error> {
        let query = query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL).bind(product.into_uuid());

        bind_details(query, details)?.fetch_one(&mut **tx).await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn bind_details<'q>(
    query: ProductQuery<'q>,
    details: &'q ProductDetails,
) -> Result<ProductQuery<'q>, sqlx::Error> {
    let discount_price = details.discount_price.map(encode_amount).transpose()?;

    Ok(query
        .bind(&details.name)
        .bind(&details.model)
        .bind(&details.image)
        .bind(&details.description)
        .bind(&details.category)
        .bind(encode_amount(details.price)?)
        .bind(discount_price)
        .bind(details.in_stock)
        .bind(details.rating)
        .bind(i32::try_from(details.reviews).map_err(|e| sqlx::Error::Encode(Box::new(e)))?))
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let reviews: i32 = row.try_get("reviews")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            model: row.try_get("model")?,
            image: row.try_get("image")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            price: try_get_amount(row, "price")?,
            discount_price: try_get_optional_amount(row, "discount_price")?,
            in_stock: row.try_get("in_stock")?,
            rating: row.try_get("rating")?,
            reviews: u32::try_from(reviews).map_err(|e| sqlx::Error::ColumnDecode {
                index: "reviews".to_string(),
                source: Box::new(e),
            })?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

/// Decode the `snapshot_*` columns of a `LEFT JOIN products`; `None` when nothing joined.
pub(crate) fn try_get_summary(row: &PgRow) -> Result<Option<ProductSummary>, sqlx::Error> {
    let Some(uuid) = row.try_get::<Option<Uuid>, _>("snapshot_uuid")? else {
        return Ok(None);
    };

    Ok(Some(ProductSummary {
        uuid: ProductUuid::from_uuid(uuid),
        name: row.try_get("snapshot_name")?,
        image: row.try_get("snapshot_image")?,
        price: try_get_amount(row, "snapshot_price")?,
        discount_price: try_get_optional_amount(row, "snapshot_discount_price")?,
        in_stock: row.try_get("snapshot_in_stock")?,
    }))
}
