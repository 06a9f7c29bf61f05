//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::SessionTokenVersion,
    domain::users::records::{Role, UserRecord, UserUuid},
};

/// Authenticated caller, resolved from a bearer token on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: UserUuid,
    pub session_uuid: Uuid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the caller may act on data owned by `user`.
    #[must_use]
    pub fn can_act_for(&self, user: UserUuid) -> bool {
        self.user_uuid == user || self.is_admin()
    }
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,

    /// OpenBao HMAC verifier for the token secret.
    pub token_hash: String,

    /// The user's current role, not the role at login time.
    pub role: Role,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: Uuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Signup request.
#[derive(Clone, PartialEq, Eq)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Signup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signup")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Login request.
#[derive(Clone, PartialEq, Eq)]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Session issued by signup or login, carrying the one-time raw token.
#[derive(Clone)]
pub struct IssuedSession {
    pub user: UserRecord,
    pub token: String,
    pub expires_at: Timestamp,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("user", &self.user)
            .field("token", &"**redacted**")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admins_can_act_for_anyone_users_only_for_themselves() {
        let me = UserUuid::new();
        let someone_else = UserUuid::new();

        let user = Principal {
            user_uuid: me,
            session_uuid: Uuid::now_v7(),
            role: Role::User,
        };
        let admin = Principal {
            role: Role::Admin,
            ..user
        };

        assert!(user.can_act_for(me));
        assert!(!user.can_act_for(someone_else));
        assert!(admin.can_act_for(someone_else));
    }
}
