//! Password hashing on the blocking thread pool.

use bcrypt::BcryptError;
use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};

/// Work factor used for new password hashes.
pub const BCRYPT_COST: u32 = 12;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Bcrypt(#[from] BcryptError),

    #[error("password hashing task failed")]
    Join(#[from] JoinError),
}

/// Hash `password` with the given bcrypt cost.
///
/// # Errors
///
/// Returns an error if bcrypt rejects the cost or the blocking task panics.
pub async fn hash_password(password: String, cost: u32) -> Result<String, PasswordError> {
    Ok(spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

/// Check `password` against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the stored hash is malformed or the blocking task panics.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    Ok(spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}
