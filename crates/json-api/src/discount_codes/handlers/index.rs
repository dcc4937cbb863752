//! Discount Code Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use pricebook_app::domain::discount_codes::data::{CodeStatus, DiscountCodeFilter};

use crate::{
    discount_codes::{errors::into_status_error, models::DiscountCodesResponse},
    extensions::*,
    state::State,
};

/// Discount Code Index Handler
///
/// Returns one page of discount codes, newest first.
#[endpoint(
    tags("discount-codes"),
    summary = "List Discount Codes",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Page of discount codes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    search: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<DiscountCodesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<CodeStatus>())
        .transpose()
        .or_400("could not parse \"status\" query parameter")?;

    let filter = DiscountCodeFilter {
        status,
        search: search.into_inner(),
        page: page.into_inner(),
        limit: limit.into_inner(),
    };

    let page = state
        .app
        .discount_codes
        .list(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use smallvec::smallvec;
    use testresult::TestResult;

    use pricebook_app::domain::{
        discount_codes::{MockDiscountCodesService, records::DiscountCodeUuid},
        pagination::{Page, PageRequest},
    };

    use crate::test_helpers::{discount_codes_service, make_discount_code};

    use super::*;

    fn make_service(service: MockDiscountCodesService) -> Service {
        discount_codes_service(service, Router::with_path("discount-codes").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_page() -> TestResult {
        let record = make_discount_code(DiscountCodeUuid::new(), "SALE10", 10, smallvec![])?;

        let mut service = MockDiscountCodesService::new();

        service
            .expect_list()
            .once()
            .withf(|filter| *filter == DiscountCodeFilter::default())
            .return_once(move |_| Ok(Page::new(vec![record], PageRequest::default(), 1)));

        let response: DiscountCodesResponse = TestClient::get("http://example.com/discount-codes")
            .send(&make_service(service))
            .await
            .take_json()
            .await?;

        assert_eq!(response.data.len(), 1, "one code");
        assert_eq!(response.pagination.limit, 10, "default limit");
        assert_eq!(response.pagination.total_pages, 1, "total pages");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_filters() -> TestResult {
        let mut service = MockDiscountCodesService::new();

        service
            .expect_list()
            .once()
            .withf(|filter| {
                *filter
                    == DiscountCodeFilter {
                        status: Some(CodeStatus::Inactive),
                        search: Some("sale".to_owned()),
                        page: Some(2),
                        limit: Some(5),
                    }
            })
            .return_once(|_| Ok(Page::new(vec![], PageRequest::new(Some(2), Some(5)), 0)));

        let res = TestClient::get(
            "http://example.com/discount-codes?status=inactive&search=sale&page=2&limit=5",
        )
        .send(&make_service(service))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK), "status");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_unknown_status_returns_400() {
        let mut service = MockDiscountCodesService::new();

        service.expect_list().never();

        let res = TestClient::get("http://example.com/discount-codes?status=expired")
            .send(&make_service(service))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST), "status");
    }
}
