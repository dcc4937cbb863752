//! Delete Discount Code Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{discount_codes::errors::into_status_error, extensions::*, state::State};

/// Delete Discount Code Handler
#[endpoint(
    tags("discount-codes"),
    summary = "Delete Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Discount code deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Discount code not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .discount_codes
        .delete(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use pricebook_app::domain::discount_codes::{
        DiscountCodesServiceError, MockDiscountCodesService, records::DiscountCodeUuid,
    };

    use crate::test_helpers::discount_codes_service;

    use super::*;

    fn make_service(service: MockDiscountCodesService) -> Service {
        discount_codes_service(
            service,
            Router::with_path("discount-codes/{uuid}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_returns_204() {
        let uuid = DiscountCodeUuid::new();

        let mut service = MockDiscountCodesService::new();

        service
            .expect_delete()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/discount-codes/{uuid}"))
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT), "status");
    }

    #[tokio::test]
    async fn test_delete_missing_code_returns_404() {
        let uuid = DiscountCodeUuid::new();

        let mut service = MockDiscountCodesService::new();

        service
            .expect_delete()
            .once()
            .return_once(|_| Err(DiscountCodesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/discount-codes/{uuid}"))
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND), "status");
    }
}
