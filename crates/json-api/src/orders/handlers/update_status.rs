//! Update Order Status Handler

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

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of `processing`, `confirmed`, `shipped`, `delivered` or `cancelled`, any case
    pub order_status: String,
}

/// Update Order Status Handler
///
/// Administrators may set any listed status regardless of the current one.
/// Payment status is left untouched.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Updated order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order_id, json, depot),
    fields(order_uuid = tracing::field::Empty, order_status = tracing::field::Empty)
)]
pub(crate) async fn handler(
    order_id: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let order_id = order_id.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order_id));
    span.record("order_status", request.order_status.as_str());

    let order = state
        .app
        .orders
        .update_order_status(principal.role, order_id.into(), &request.order_status)
        .await
        .map_err(into_status_error)?;

    tracing::info!(order_uuid = %order.uuid, status = %order.order_status, "order status updated");

    Ok(Json(order.into()))
}
