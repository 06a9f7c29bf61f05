//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Postgres, Row, Transaction, query};
use uuid::Uuid;

use crate::{
    auth::{
        SessionTokenVersion,
        models::{ActiveSession, NewSession},
    },
    domain::users::records::UserUuid,
};

const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_ACTIVE_SESSION_SQL: &str = include_str!("sql/find_active_session.sql");
const TOUCH_SESSION_SQL: &str = include_str!("sql/touch_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &NewSession,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(session.uuid)
            .bind(session.user_uuid.into_uuid())
            .bind(session.version.as_i16())
            .bind(&session.token_hash)
            .bind(SqlxTimestamp::from(session.expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Unrevoked, unexpired session together with its owner's current role.
    pub(crate) async fn find_active_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
        version: SessionTokenVersion,
    ) -> Result<Option<ActiveSession>, sqlx::Error> {
        let Some(row) = query(FIND_ACTIVE_SESSION_SQL)
            .bind(session)
            .bind(version.as_i16())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let decode = |index: &str, source: Box<dyn std::error::Error + Send + Sync>| {
            sqlx::Error::ColumnDecode {
                index: index.to_string(),
                source,
            }
        };

        let version: i16 = row.try_get("version")?;
        let role: String = row.try_get("role")?;

        Ok(Some(ActiveSession {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: SessionTokenVersion::try_from(version)
                .map_err(|e| decode("version", Box::new(e)))?,
            token_hash: row.try_get("token_hash")?,
            role: role.parse().map_err(|e| decode("role", Box::new(e)))?,
        }))
    }

    pub(crate) async fn touch_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(TOUCH_SESSION_SQL)
            .bind(session)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(session)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
