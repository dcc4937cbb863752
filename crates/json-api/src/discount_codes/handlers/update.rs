//! Update Discount Code Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    discount_codes::{
        errors::into_status_error,
        models::{DiscountCodeResponse, UpdateDiscountCodeRequest},
    },
    extensions::*,
    state::State,
};

/// Update Discount Code Handler
///
/// Applies a partial update; omitted fields keep their current value.
#[endpoint(
    tags("discount-codes"),
    summary = "Update Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount code updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount code not found"),
        (status_code = StatusCode::CONFLICT, description = "Discount code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "discount_codes.update",
    skip(uuid, json, depot),
    fields(discount_code_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateDiscountCodeRequest>,
    depot: &mut Depot,
) -> Result<Json<DiscountCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = uuid.into_inner();

    tracing::Span::current().record("discount_code_uuid", tracing::field::display(uuid));

    let record = state
        .app
        .discount_codes
        .update(uuid.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use smallvec::smallvec;
    use testresult::TestResult;

    use pricebook_app::domain::discount_codes::{
        DiscountCodesServiceError, MockDiscountCodesService, data::DiscountCodeUpdate,
        records::DiscountCodeUuid,
    };

    use crate::test_helpers::{discount_codes_service, make_discount_code};

    use super::*;

    fn make_service(service: MockDiscountCodesService) -> Service {
        discount_codes_service(service, Router::with_path("discount-codes/{uuid}").put(handler))
    }

    #[tokio::test]
    async fn test_update_forwards_only_given_fields() -> TestResult {
        let uuid = DiscountCodeUuid::new();
        let record = make_discount_code(uuid, "SALE20", 20, smallvec![])?;

        let mut service = MockDiscountCodesService::new();

        service
            .expect_update()
            .once()
            .withf(move |requested, update| {
                *requested == uuid
                    && *update
                        == DiscountCodeUpdate {
                            value: Some(Decimal::from(20)),
                            is_active: Some(false),
                            ..DiscountCodeUpdate::default()
                        }
            })
            .return_once(move |_, _| Ok(record));

        let response: DiscountCodeResponse =
            TestClient::put(format!("http://example.com/discount-codes/{uuid}"))
                .json(&json!({ "value": "20", "is_active": false }))
                .send(&make_service(service))
                .await
                .take_json()
                .await?;

        assert_eq!(response.code, "SALE20", "code");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_code_returns_404() {
        let uuid = DiscountCodeUuid::new();

        let mut service = MockDiscountCodesService::new();

        service
            .expect_update()
            .once()
            .return_once(|_, _| Err(DiscountCodesServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/discount-codes/{uuid}"))
            .json(&json!({ "is_active": false }))
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "status");
    }

    #[tokio::test]
    async fn test_update_to_taken_code_returns_409() {
        let uuid = DiscountCodeUuid::new();

        let mut service = MockDiscountCodesService::new();

        service
            .expect_update()
            .once()
            .return_once(|_, _| Err(DiscountCodesServiceError::DuplicateCode));

        let res = TestClient::put(format!("http://example.com/discount-codes/{uuid}"))
            .json(&json!({ "code": "TAKEN" }))
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT), "status");
    }
}
