//! Quote Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::errors::into_status_error,
    pricing::models::{CartItemRequest, QuoteResponse},
    state::State,
};

/// Quote Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequest {
    pub items: Vec<CartItemRequest>,
}

/// Quote Handler
///
/// Prices a cart with the best usable discount code and the shipping policy.
#[endpoint(
    tags("pricing"),
    summary = "Quote Cart",
    responses(
        (status_code = StatusCode::OK, description = "Priced cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<QuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let items = json.into_inner().items.into_iter().map(Into::into).collect();

    let quote = state
        .app
        .checkout
        .quote(items, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}

#[cfg(test)]
mod tests {
    use pricebook::products::ProductId;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use pricebook_app::domain::orders::{CheckoutServiceError, MockCheckoutService};

    use crate::test_helpers::{checkout_service, make_quote};

    use super::*;

    fn make_service(checkout: MockCheckoutService) -> Service {
        checkout_service(checkout, Router::with_path("pricing/quote").post(handler))
    }

    #[tokio::test]
    async fn test_quote_returns_priced_cart() -> TestResult {
        let product = ProductId::generate();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_quote()
            .once()
            .withf(move |items, _| {
                items.len() == 1
                    && items.first().is_some_and(|item| {
                        item.product_uuid == product && item.price == 200_000 && item.quantity == 1
                    })
            })
            .return_once(|_, _| Ok(make_quote(200_000)));

        let response: QuoteResponse = TestClient::post("http://example.com/pricing/quote")
            .json(&json!({
                "items": [{
                    "product_uuid": product.into_uuid(),
                    "name": "Lamp",
                    "price": 200_000,
                    "quantity": 1,
                }],
            }))
            .send(&make_service(checkout))
            .await
            .take_json()
            .await?;

        assert_eq!(response.total, 230_000, "total");
        assert_eq!(response.display.total, "230.000 ₫", "display total");

        Ok(())
    }

    #[tokio::test]
    async fn test_quote_zero_quantity_returns_400() {
        let product = ProductId::generate();

        let mut checkout = MockCheckoutService::new();

        checkout
            .expect_quote()
            .once()
            .return_once(move |_, _| Err(CheckoutServiceError::InvalidQuantity(product)));

        let res = TestClient::post("http://example.com/pricing/quote")
            .json(&json!({
                "items": [{
                    "product_uuid": product.into_uuid(),
                    "name": "Lamp",
                    "price": 200_000,
                    "quantity": 0,
                }],
            }))
            .send(&make_service(checkout))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "status");
    }
}
