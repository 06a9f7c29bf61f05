//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        AuthServiceError, BCRYPT_COST, IssuedSession, Login, NewSession, Principal, SessionToken,
        Signup, TokenVerifier, hash_password, repository::PgAuthRepository, verify_password,
    },
    database::Db,
    domain::users::{
        UsersServiceError,
        data::{NewUser, check_password_policy, normalise_email, normalise_name},
        records::{Role, UserUuid},
        repository::PgUsersRepository,
    },
};

/// Session lifetime used when none is configured.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_mins(60);

#[derive(Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    users_repository: PgUsersRepository,
    verifier: Arc<dyn TokenVerifier>,
    session_ttl: SignedDuration,
    bcrypt_cost: u32,
}

impl std::fmt::Debug for PgAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgAuthService")
            .field("session_ttl", &self.session_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            users_repository: PgUsersRepository::new(),
            verifier,
            session_ttl: DEFAULT_SESSION_TTL,
            bcrypt_cost: BCRYPT_COST,
        }
    }

    #[must_use]
    pub fn with_session_ttl(mut self, session_ttl: SignedDuration) -> Self {
        self.session_ttl = session_ttl;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, bcrypt_cost: u32) -> Self {
        self.bcrypt_cost = bcrypt_cost;
        self
    }

    /// Mint a token and compute its verifier. Nothing is stored yet.
    async fn prepare_session(
        &self,
        user: UserUuid,
    ) -> Result<(SessionToken, NewSession), AuthServiceError> {
        let token = SessionToken::generate();

        let token_hash = self.verifier.hmac(&token.verifier_input(user)).await?;

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::InvalidLifetime)?;

        let session = NewSession {
            uuid: token.session_uuid,
            user_uuid: user,
            version: token.version,
            token_hash,
            expires_at,
        };

        Ok((token, session))
    }

    async fn touch_session(&self, session: Uuid) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        self.repository.touch_session(&mut tx, session).await?;

        tx.commit().await
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn signup(&self, signup: Signup) -> Result<IssuedSession, AuthServiceError> {
        let name = normalise_name(&signup.name)?;
        let email = normalise_email(&signup.email)?;

        check_password_policy(&signup.password)?;

        let password_hash = hash_password(signup.password, self.bcrypt_cost).await?;

        let user_uuid = UserUuid::new();
        let (token, session) = self.prepare_session(user_uuid).await?;

        let mut tx = self.db.begin().await?;

        let user = self
            .users_repository
            .create_user(
                &mut tx,
                &NewUser {
                    uuid: user_uuid,
                    name,
                    email,
                    password_hash,
                    role: Role::User,
                },
            )
            .await
            .map_err(UsersServiceError::from)?;

        self.repository.create_session(&mut tx, &session).await?;

        tx.commit().await?;

        info!(user = %user.uuid, "user signed up");

        Ok(IssuedSession {
            user,
            token: token.to_string(),
            expires_at: session.expires_at,
        })
    }

    async fn login(&self, login: Login) -> Result<IssuedSession, AuthServiceError> {
        let email = normalise_email(&login.email).map_err(|_| AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .users_repository
            .find_credentials(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        tx.commit().await?;

        if !verify_password(login.password, credentials.password_hash).await? {
            debug!(user = %credentials.uuid, "password mismatch");

            return Err(AuthServiceError::InvalidCredentials);
        }

        let (token, session) = self.prepare_session(credentials.uuid).await?;

        let mut tx = self.db.begin().await?;

        let user = self.users_repository.get_user(&mut tx, credentials.uuid).await?;

        self.repository.create_session(&mut tx, &session).await?;

        tx.commit().await?;

        info!(user = %user.uuid, "user logged in");

        Ok(IssuedSession {
            user,
            token: token.to_string(),
            expires_at: session.expires_at,
        })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let token: SessionToken = bearer_token
            .parse()
            .map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, token.session_uuid, token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        if session.version != token.version {
            return Err(AuthServiceError::NotFound);
        }

        let valid = self
            .verifier
            .verify(&token.verifier_input(session.user_uuid), &session.token_hash)
            .await?;

        if !valid {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(error) = self.touch_session(token.session_uuid).await {
            warn!(%error, "failed to record session use");
        }

        Ok(Principal {
            user_uuid: session.user_uuid,
            session_uuid: token.session_uuid,
            role: session.role,
        })
    }

    async fn logout(&self, session: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        debug!(%session, revoked, "session revoked");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and open a session for them.
    async fn signup(&self, signup: Signup) -> Result<IssuedSession, AuthServiceError>;

    /// Check a user's password and open a session.
    async fn login(&self, login: Login) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the caller it was issued to.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<Principal, AuthServiceError>;

    /// Revoke a session. Revoking an already revoked session is not an error.
    async fn logout(&self, session: Uuid) -> Result<(), AuthServiceError>;
}
