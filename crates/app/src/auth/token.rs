//! Session token formatting, parsing, and HMAC input construction.
//!
//! Tokens look like `st_v1_<session uuid, simple>.<64 hex chars of secret>`. Only an HMAC of
//! the secret is ever stored.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "st";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SESSION_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self { bytes }
    }

    fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        self.bytes
            .iter()
            .flat_map(|byte| [HEX[usize::from(byte >> 4)], HEX[usize::from(byte & 0x0f)]])
            .map(char::from)
            .collect()
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != SECRET_HEX_CHARS {
            return None;
        }

        let mut bytes = [0_u8; SESSION_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            *byte = (hex_nibble(pair[0])? << 4) | hex_nibble(pair[1])?;
        }

        Some(Self { bytes })
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl PartialEq for SessionSecret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

fn hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

/// Bearer token split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken {
    pub session_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

impl SessionToken {
    /// Fresh token for a new session.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            session_uuid: Uuid::now_v7(),
            version: SessionTokenVersion::V1,
            secret: SessionSecret::generate(),
        }
    }

    /// Canonical HMAC input: `{session_uuid}:{version}:{user_uuid}:{secret_hex}`.
    ///
    /// Binding the user into the verifier stops a stored hash from being replayed for
    /// another account.
    #[must_use]
    pub fn verifier_input(&self, user: UserUuid) -> Vec<u8> {
        format!(
            "{}:{}:{}:{}",
            self.session_uuid.simple(),
            self.version.as_i16(),
            user.into_uuid().simple(),
            self.secret.to_hex(),
        )
        .into_bytes()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.session_uuid.simple(),
            self.secret.to_hex()
        )
    }
}

impl FromStr for SessionToken {
    type Err = SessionTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (id, secret_hex) = token
            .split_once('.')
            .ok_or(SessionTokenError::InvalidFormat)?;

        let mut parts = id.splitn(3, '_');

        let (Some(SESSION_TOKEN_PREFIX), Some(version), Some(session_uuid)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionTokenError::InvalidFormat);
        };

        Ok(Self {
            version: version.parse()?,
            session_uuid: Uuid::try_parse(session_uuid)
                .map_err(|_| SessionTokenError::InvalidFormat)?,
            secret: SessionSecret::from_hex(secret_hex)
                .ok_or(SessionTokenError::InvalidSecretEncoding)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_token_parses_back() {
        let token = SessionToken {
            session_uuid: Uuid::nil(),
            version: SessionTokenVersion::V1,
            secret: SessionSecret::from_bytes([0xAB; SESSION_TOKEN_SECRET_BYTES]),
        };

        let formatted = token.to_string();

        assert!(formatted.starts_with("st_v1_00000000000000000000000000000000."));
        assert_eq!(formatted.parse::<SessionToken>().ok(), Some(token));
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        let result = "lt_v1_00000000000000000000000000000000.aa".parse::<SessionToken>();

        assert!(matches!(result, Err(SessionTokenError::InvalidFormat)));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("st_v9_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert!(matches!(
            token.parse::<SessionToken>(),
            Err(SessionTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_or_non_hex_secret() {
        let short = format!("st_v1_{}.abcd", Uuid::nil().simple());
        let non_hex = format!("st_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        assert!(matches!(
            short.parse::<SessionToken>(),
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
        assert!(matches!(
            non_hex.parse::<SessionToken>(),
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn verifier_input_depends_on_user() {
        let token = SessionToken::generate();

        let a = token.verifier_input(UserUuid::from_uuid(Uuid::nil()));
        let b = token.verifier_input(UserUuid::from_uuid(Uuid::max()));

        assert_eq!(a, token.verifier_input(UserUuid::from_uuid(Uuid::nil())));
        assert_ne!(a, b);
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let token = SessionToken::generate();

        let debug = format!("{token:?}");

        assert!(debug.contains("**redacted**"));
        assert!(!debug.contains(&token.secret.to_hex()));
    }
}
