//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use pricebook_app::domain::orders::{
    data::OrderStatusUpdate,
    status::{OrderStatus, PaymentStatus},
};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{OrderResponse, UpdateOrderStatusRequest},
    },
    state::State,
};

/// Update Order Status Handler
///
/// Orders move forward through their lifecycle or get cancelled; paid and failed payments
/// are final.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Status change not allowed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(uuid, json, depot),
    fields(order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = uuid.into_inner();
    let request = json.into_inner();

    tracing::Span::current().record("order_uuid", tracing::field::display(uuid));

    let update = OrderStatusUpdate {
        status: request
            .status
            .map(|status| status.parse::<OrderStatus>())
            .transpose()
            .or_400("could not parse \"status\"")?,
        payment_status: request
            .payment_status
            .map(|status| status.parse::<PaymentStatus>())
            .transpose()
            .or_400("could not parse \"payment_status\"")?,
    };

    let order = state
        .app
        .checkout
        .update_status(uuid.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pricebook_app::domain::orders::{
        CheckoutServiceError, MockCheckoutService, records::OrderUuid,
    };

    use crate::test_helpers::{checkout_service, make_order};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(
            checkout,
            Router::with_path("orders/{uuid}/status").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_status_update_is_forwarded() -> TestResult {
        let uuid = OrderUuid::new();
        let mut order = make_order(uuid, "DHABC123")?;

        order.status = OrderStatus::Shipping;
        order.payment_status = PaymentStatus::Paid;

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_update_status()
            .once()
            .withf(move |requested, update| {
                *requested == uuid
                    && *update
                        == OrderStatusUpdate {
                            status: Some(OrderStatus::Shipping),
                            payment_status: Some(PaymentStatus::Paid),
                        }
            })
            .return_once(move |_, _| Ok(order));

        let response: OrderResponse =
            TestClient::patch(format!("http://example.com/orders/{uuid}/status"))
                .json(&json!({ "status": "shipping", "payment_status": "paid" }))
                .send(&make_service(checkout))
                .await
                .take_json()
                .await?;

        assert_eq!(response.status, "shipping", "status");
        assert_eq!(response.payment_status, "paid", "payment status");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_update_status().never();

        let url = format!("http://example.com/orders/{}/status", OrderUuid::new());

        let res = TestClient::patch(url)
            .json(&json!({ "status": "lost" }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "status");
    }

    #[tokio::test]
    async fn test_backwards_transition_returns_409() {
        let mut checkout = MockCheckoutService::new();

        checkout.expect_update_status().once().return_once(|_, _| {
            Err(CheckoutServiceError::InvalidTransition {
                from: OrderStatus::Delivered,
                to: OrderStatus::Shipping,
            })
        });

        let url = format!("http://example.com/orders/{}/status", OrderUuid::new());

        let res = TestClient::patch(url)
            .json(&json!({ "status": "shipping" }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT), "status");
    }
}
