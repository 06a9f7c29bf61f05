//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

use super::authorize;

/// Remove Cart Item Handler
///
/// Removing a product that is not in the cart returns the cart unchanged.
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated cart"),
        (status_code = StatusCode::FORBIDDEN, description = "Cart belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "carts.remove_item",
    skip(user_id, product_id, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    user_id: PathParam<Uuid>,
    product_id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = authorize(depot, user_id.into_inner())?;
    let product = product_id.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));
    span.record("product_uuid", tracing::field::display(product));

    let cart = state
        .app
        .carts
        .remove_item(user, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
