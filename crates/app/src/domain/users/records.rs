//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::users::UsersServiceError, uuids::typed_uuid};

typed_uuid!(
    /// User UUID
    UserUuid
);

/// Capability level attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UsersServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UsersServiceError::UnknownRole(other.to_string())),
        }
    }
}

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Password verifier for a user, only used while logging in.
#[derive(Clone)]
pub(crate) struct UserCredentials {
    pub uuid: UserUuid,
    pub password_hash: String,
}

impl fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredentials")
            .field("uuid", &self.uuid)
            .field("password_hash", &"**redacted**")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_values() {
        assert_eq!("user".parse::<Role>().ok(), Some(Role::User));
        assert_eq!("admin".parse::<Role>().ok(), Some(Role::Admin));
    }

    #[test]
    fn role_rejects_unknown_values() {
        let result = "superuser".parse::<Role>();

        assert!(
            matches!(result, Err(UsersServiceError::UnknownRole(ref role)) if role == "superuser"),
            "expected UnknownRole, got {result:?}"
        );
    }
}
