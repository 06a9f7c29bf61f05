//! OpenBao Transit client for HMAC operations.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::auth::TokenVerifier;

/// Configuration for connecting to an OpenBao instance.
#[derive(Debug, Clone)]
pub struct OpenBaoConfig {
    /// OpenBao server address, e.g. `"http://localhost:8200"`.
    pub addr: String,

    /// OpenBao authentication token.
    pub token: String,

    /// Transit key used for HMAC operations.
    pub transit_key: String,
}

/// HTTP client for OpenBao Transit HMAC operations.
#[derive(Debug, Clone)]
pub struct OpenBaoClient {
    config: OpenBaoConfig,
    http: Client,
}

impl OpenBaoClient {
    #[must_use]
    pub fn new(config: OpenBaoConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    async fn transit<B, R>(&self, operation: &str, body: &B) -> Result<R, OpenBaoError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!(
            "{}/v1/transit/{operation}/{}",
            self.config.addr.trim_end_matches('/'),
            self.config.transit_key
        );

        let response = self
            .http
            .post(&url)
            .header("X-Vault-Token", &self.config.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            debug!(%status, operation, "transit request rejected");

            return Err(OpenBaoError::UnexpectedResponse(format!(
                "{operation} request failed with status {status}: {text}"
            )));
        }

        let envelope: TransitResponse<R> = response.json().await?;

        Ok(envelope.data)
    }
}

#[async_trait]
impl TokenVerifier for OpenBaoClient {
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        let data: HmacData = self
            .transit(
                "hmac",
                &HmacRequest {
                    input: BASE64.encode(input),
                },
            )
            .await?;

        Ok(data.hmac)
    }

    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        let data: VerifyData = self
            .transit(
                "verify",
                &VerifyRequest {
                    input: BASE64.encode(input),
                    hmac,
                },
            )
            .await?;

        Ok(data.valid)
    }
}

#[derive(Debug, Serialize)]
struct HmacRequest {
    input: String,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    input: String,
    hmac: &'a str,
}

#[derive(Debug, Deserialize)]
struct TransitResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct HmacData {
    hmac: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    valid: bool,
}

/// Errors that can occur when communicating with OpenBao.
#[derive(Debug, Error)]
pub enum OpenBaoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from OpenBao: {0}")]
    UnexpectedResponse(String),
}
