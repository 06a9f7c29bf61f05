//! Test Helpers

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::{
    auth::{OpenBaoError, TokenVerifier},
    domain::products::data::ProductDetails,
};

/// Catalog fields with sensible defaults for everything but name, category, and price.
pub(crate) fn product_details(name: &str, category: &str, price: u64) -> ProductDetails {
    ProductDetails {
        name: name.to_string(),
        model: format!("{name} Model"),
        image: format!("https://cdn.example.com/{}.png", name.to_lowercase().replace(' ', "-")),
        description: format!("{name} for testing"),
        category: category.to_string(),
        price,
        discount_price: None,
        in_stock: true,
        rating: 4.5,
        reviews: 0,
    }
}

/// Deterministic stand-in for the OpenBao transit engine.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTokenVerifier;

#[async_trait]
impl TokenVerifier for FakeTokenVerifier {
    async fn hmac(&self, input: &[u8]) -> Result<String, OpenBaoError> {
        Ok(format!("fake:v1:{}", BASE64.encode(input)))
    }

    async fn verify(&self, input: &[u8], hmac: &str) -> Result<bool, OpenBaoError> {
        Ok(self.hmac(input).await? == hmac)
    }
}
