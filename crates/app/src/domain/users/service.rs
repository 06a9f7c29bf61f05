//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{Role, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.find_user_by_email(&mut tx, email.trim()).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn set_role(&self, email: &str, role: Role) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.set_role(&mut tx, email.trim(), role).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Look a user up by e-mail address, ignoring case.
    async fn find_user_by_email(&self, email: &str)
    -> Result<Option<UserRecord>, UsersServiceError>;

    /// Store a new user whose password has already been hashed.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Change the role of the user registered under `email`.
    async fn set_role(&self, email: &str, role: Role) -> Result<UserRecord, UsersServiceError>;
}
