//! User Data

use crate::domain::users::{UsersServiceError, records::{Role, UserUuid}};

/// Minimum accepted length of a display name, in characters.
pub const MIN_NAME_CHARS: usize = 2;

/// Minimum accepted length of a password, in characters.
pub const MIN_PASSWORD_CHARS: usize = 8;

/// New User Data
///
/// `password_hash` is an already computed bcrypt verifier, never a raw password.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Trim a display name and check its length.
///
/// # Errors
///
/// Returns [`UsersServiceError::InvalidName`] when the trimmed name is too short.
pub fn normalise_name(name: &str) -> Result<String, UsersServiceError> {
    let name = name.trim();

    if name.chars().count() < MIN_NAME_CHARS {
        return Err(UsersServiceError::InvalidName);
    }

    Ok(name.to_string())
}

/// Trim and lower-case an e-mail address, rejecting anything without a local part and domain.
///
/// # Errors
///
/// Returns [`UsersServiceError::InvalidEmail`] for malformed addresses.
pub fn normalise_email(email: &str) -> Result<String, UsersServiceError> {
    let email = email.trim().to_lowercase();

    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(UsersServiceError::InvalidEmail),
    }
}

/// Check a raw password against the minimum length policy.
///
/// # Errors
///
/// Returns [`UsersServiceError::WeakPassword`] when the password is too short.
pub fn check_password_policy(password: &str) -> Result<(), UsersServiceError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(UsersServiceError::WeakPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lower_cased() {
        assert_eq!(
            normalise_email("  Jane.Doe@Example.COM ").ok().as_deref(),
            Some("jane.doe@example.com")
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "jane", "@example.com", "jane@localhost", "a@b@c.com"] {
            assert!(
                matches!(normalise_email(email), Err(UsersServiceError::InvalidEmail)),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn short_names_are_rejected() {
        assert!(matches!(normalise_name(" J "), Err(UsersServiceError::InvalidName)));
        assert_eq!(normalise_name(" Jo ").ok().as_deref(), Some("Jo"));
    }

    #[test]
    fn password_policy_requires_eight_characters() {
        assert!(check_password_policy("1234567").is_err());
        assert!(check_password_policy("12345678").is_ok());
    }
}
