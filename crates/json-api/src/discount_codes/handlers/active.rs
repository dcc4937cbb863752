//! Active Discount Codes Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    discount_codes::{errors::into_status_error, models::ActiveDiscountCodesResponse},
    extensions::*,
    state::State,
};

/// Active Discount Codes Handler
///
/// Returns the codes shoppers can use, at `at` or now.
#[endpoint(
    tags("discount-codes"),
    summary = "List Active Discount Codes",
    responses(
        (status_code = StatusCode::OK, description = "Usable discount codes"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ActiveDiscountCodesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let codes = state
        .app
        .discount_codes
        .list_active(point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ActiveDiscountCodesResponse {
        discount_codes: codes.into_iter().map(Into::into).collect(),
    }))
}
