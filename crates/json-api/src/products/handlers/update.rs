//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use tracing::Span;
use uuid::Uuid;

use storefront_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductPayload, ProductResponse},
    },
    state::State,
};

/// Update Product Handler
///
/// Replaces every catalog field of a live product.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, depot),
    fields(product_uuid = tracing::field::Empty, price = tracing::field::Empty)
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductPayload>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let product = product.into_inner();
    let payload = json.into_inner();

    let span = Span::current();

    span.record("product_uuid", tracing::field::display(product));
    span.record("price", payload.price);

    let updated = state
        .app
        .products
        .update_product(
            product.into(),
            ProductUpdate {
                details: payload.into(),
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
