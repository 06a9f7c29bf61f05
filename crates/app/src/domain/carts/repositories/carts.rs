//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{carts::records::CartRecord, users::records::UserUuid};

const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const ENSURE_CART_SQL: &str = include_str!("../sql/ensure_cart.sql");
const BUMP_CART_VERSION_SQL: &str = include_str!("../sql/bump_cart_version.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Fetch the cart header without its lines.
    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CartRecord>, sqlx::Error> {
        query_as::<Postgres, CartRecord>(GET_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn ensure_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(ENSURE_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Lock the cart row and advance its version.
    ///
    /// Returns `None` when the user has no cart or, with `expected` set, when the stored
    /// version differs.
    pub(crate) async fn bump_version(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        expected: Option<u64>,
    ) -> Result<Option<u64>, sqlx::Error> {
        let expected = expected
            .map(i64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let version: Option<i64> = query_scalar(BUMP_CART_VERSION_SQL)
            .bind(user.into_uuid())
            .bind(expected)
            .fetch_optional(&mut **tx)
            .await?;

        version.map(decode_version).transpose()
    }
}

fn decode_version(version: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
        index: "version".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for CartRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: decode_version(row.try_get("version")?)?,
            items: Vec::new(),
            created_at: Some(row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff()),
            updated_at: Some(row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff()),
        })
    }
}
