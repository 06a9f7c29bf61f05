//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::CartItemUpdate;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

use super::authorize;

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// Exact quantity to store
    pub quantity: u32,

    /// Cart version the client last saw; the update fails with 409 if it moved on
    #[serde(default)]
    pub version: Option<u64>,
}

/// Update Cart Item Handler
///
/// Sets a line to an exact quantity, creating the cart and line when missing.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
        (status_code = StatusCode::CONFLICT, description = "Cart version is stale"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.update_item",
    skip(user_id, product_id, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    )
)]
pub(crate) async fn handler(
    user_id: PathParam<Uuid>,
    product_id: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = authorize(depot, user_id.into_inner())?;
    let product = product_id.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));
    span.record("quantity", request.quantity);

    let cart = state
        .app
        .carts
        .set_quantity(
            user,
            CartItemUpdate {
                product_uuid: product.into(),
                quantity: request.quantity,
                expected_version: request.version,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
