//! Place Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::Span;
use uuid::Uuid;

use storefront_app::domain::orders::{data::PlaceOrder, records::OrderUuid};

use crate::{
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    orders::{
        errors::{checkout_outcome, into_status_error},
        models::ShippingAddressPayload,
    },
    state::State,
};

/// Place Order Request
///
/// Lines and prices always come from the caller's cart and the catalog.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceOrderRequest {
    /// Idempotency key; retrying with the same id never places a second order
    #[serde(default)]
    pub order_id: Option<Uuid>,

    /// Total the client showed the shopper, in minor currency units
    #[serde(default)]
    pub total_amount: Option<u64>,

    pub shipping_address: ShippingAddressPayload,

    pub payment_method: String,
}

impl From<PlaceOrderRequest> for PlaceOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        PlaceOrder {
            uuid: request.order_id.map(OrderUuid::from_uuid),
            shipping_address: request.shipping_address.into(),
            payment_method: request.payment_method,
            expected_total: request.total_amount,
        }
    }
}

/// Place Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaceOrderResponse {
    pub message: String,
    pub order_id: Uuid,
}

/// Place Order Handler
///
/// Converts the caller's cart into a paid, confirmed order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or invalid checkout details"),
        (status_code = StatusCode::NOT_FOUND, description = "A cart product no longer exists"),
        (status_code = StatusCode::CONFLICT, description = "Cart, stock or total changed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.place",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty)
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PlaceOrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    Span::current().record("user_uuid", tracing::field::display(principal.user_uuid));

    let order = state
        .app
        .orders
        .place_order(principal.user_uuid, json.into_inner().into())
        .await
        .map_err(|error| {
            record_checkout(checkout_outcome(&error));

            into_status_error(error)
        })?;

    record_checkout(CheckoutOutcome::Placed);

    Span::current().record("order_uuid", tracing::field::display(order));

    tracing::info!(order_uuid = %order, "order placed");

    res.status_code(StatusCode::CREATED);

    Ok(Json(PlaceOrderResponse {
        message: "Order placed successfully".to_string(),
        order_id: order.into(),
    }))
}
