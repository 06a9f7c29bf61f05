//! Keyed hashing of session secrets.

use async_trait::async_trait;
use mockall::automock;

use crate::auth::OpenBaoError;

/// Computes and checks the keyed verifiers stored for session tokens.
#[automock]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Compute the opaque verifier for `input`.
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError>;

    /// Check `input` against a previously computed verifier.
    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError>;
}
