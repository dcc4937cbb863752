//! Check Discount Code Handler

use std::sync::Arc;

use jiff::Timestamp;
use pricebook::products::ProductId;
use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    discount_codes::{
        errors::into_status_error,
        models::{CheckDiscountCodeRequest, DiscountCodeResponse},
    },
    extensions::*,
    state::State,
};

/// Check Discount Code Handler
///
/// Looks up a shopper-entered code and confirms it can be used now, optionally for one product.
/// Unusable codes answer 422 with the reason (`inactive` or `product_not_allowed`) as the
/// error brief.
#[endpoint(
    tags("discount-codes"),
    summary = "Check Discount Code",
    responses(
        (status_code = StatusCode::OK, description = "Code is usable"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown code"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Code cannot be used"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckDiscountCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let record = state
        .app
        .discount_codes
        .check_code(
            request.code,
            request.product_uuid.map(ProductId::from),
            Timestamp::now(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::ACCEPT,
        test::{ResponseExt, TestClient},
    };
    use serde_json::{Value, json};
    use smallvec::smallvec;
    use testresult::TestResult;

    use pricebook_app::domain::discount_codes::{
        DiscountCodesServiceError, MockDiscountCodesService, records::DiscountCodeUuid,
    };

    use crate::test_helpers::{discount_codes_service, make_discount_code};

    use super::*;

    fn make_service(service: MockDiscountCodesService) -> Service {
        discount_codes_service(
            service,
            Router::with_path("discount-codes/check").post(handler),
        )
    }

    #[tokio::test]
    async fn test_check_usable_code_returns_it() -> TestResult {
        let product = ProductId::generate();
        let record = make_discount_code(DiscountCodeUuid::new(), "SALE10", 10, smallvec![product])?;

        let mut service = MockDiscountCodesService::new();

        service
            .expect_check_code()
            .once()
            .withf(move |code, requested, _| code == "SALE10" && *requested == Some(product))
            .return_once(move |_, _, _| Ok(record));

        let response: DiscountCodeResponse =
            TestClient::post("http://example.com/discount-codes/check")
                .json(&json!({ "code": "SALE10", "product_uuid": product.into_uuid() }))
                .send(&make_service(service))
                .await
                .take_json()
                .await?;

        assert_eq!(response.code, "SALE10", "code");

        Ok(())
    }

    #[tokio::test]
    async fn test_check_unknown_code_returns_404() {
        let mut service = MockDiscountCodesService::new();

        service
            .expect_check_code()
            .once()
            .withf(|code, product, _| code == "NOPE" && product.is_none())
            .return_once(|_, _, _| Err(DiscountCodesServiceError::NotFound));

        let res = TestClient::post("http://example.com/discount-codes/check")
            .json(&json!({ "code": "NOPE" }))
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "status");
    }

    #[tokio::test]
    async fn test_check_inactive_code_returns_422_with_kind() -> TestResult {
        let mut service = MockDiscountCodesService::new();

        service
            .expect_check_code()
            .once()
            .return_once(|_, _, _| Err(DiscountCodesServiceError::Inactive));

        let mut res = TestClient::post("http://example.com/discount-codes/check")
            .add_header(ACCEPT, "application/json", true)
            .json(&json!({ "code": "OLD10" }))
            .send(&make_service(service))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY), "status");
        assert_eq!(body["error"]["brief"], "inactive", "kind reported");

        Ok(())
    }

    #[tokio::test]
    async fn test_check_code_for_other_product_returns_422() -> TestResult {
        let mut service = MockDiscountCodesService::new();

        service
            .expect_check_code()
            .once()
            .return_once(|_, _, _| Err(DiscountCodesServiceError::ProductNotAllowed));

        let mut res = TestClient::post("http://example.com/discount-codes/check")
            .add_header(ACCEPT, "application/json", true)
            .json(&json!({ "code": "LAMP10", "product_uuid": ProductId::generate().into_uuid() }))
            .send(&make_service(service))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY), "status");
        assert_eq!(body["error"]["brief"], "product_not_allowed", "kind reported");

        Ok(())
    }
}
