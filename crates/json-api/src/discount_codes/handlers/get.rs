//! Get Discount Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    discount_codes::{errors::into_status_error, models::DiscountCodeResponse},
    extensions::*,
    state::State,
};

/// Get Discount Code Handler
#[endpoint(
    tags("discount-codes"),
    summary = "Get Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Discount code"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount code not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<DiscountCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .app
        .discount_codes
        .get(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use smallvec::smallvec;
    use testresult::TestResult;

    use pricebook_app::domain::discount_codes::{
        DiscountCodesServiceError, MockDiscountCodesService, records::DiscountCodeUuid,
    };

    use crate::test_helpers::{discount_codes_service, make_discount_code};

    use super::*;

    fn make_service(service: MockDiscountCodesService) -> Service {
        discount_codes_service(service, Router::with_path("discount-codes/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_code() -> TestResult {
        let uuid = DiscountCodeUuid::new();
        let record = make_discount_code(uuid, "SALE10", 10, smallvec![])?;

        let mut service = MockDiscountCodesService::new();

        service
            .expect_get()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(record));

        let response: DiscountCodeResponse =
            TestClient::get(format!("http://example.com/discount-codes/{uuid}"))
                .send(&make_service(service))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid(), "uuid");
        assert_eq!(response.code, "SALE10", "code");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_code_returns_404() {
        let uuid = DiscountCodeUuid::new();

        let mut service = MockDiscountCodesService::new();

        service
            .expect_get()
            .once()
            .return_once(|_| Err(DiscountCodesServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/discount-codes/{uuid}"))
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "status");
    }
}
