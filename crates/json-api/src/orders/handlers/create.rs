//! Create Order Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    observability::observe_order_placed,
    orders::{
        errors::into_status_error,
        models::{CreateOrderRequest, OrderResponse},
    },
    state::State,
};

/// Create Order Handler
///
/// Re-prices the cart against the discount codes usable right now; prices and discounts
/// computed by the client are never trusted.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Retry later"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(payment_code = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .checkout
        .place_order(json.into_inner().into(), Timestamp::now())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record(
        "payment_code",
        tracing::field::display(&order.payment_code),
    );

    observe_order_placed(order.pricing.discount.is_some());

    res.add_header(LOCATION, format!("/orders/{}", order.payment_code), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
