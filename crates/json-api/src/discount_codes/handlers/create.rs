//! Create Discount Code Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    discount_codes::{
        errors::into_status_error,
        models::{CreateDiscountCodeRequest, DiscountCodeResponse},
    },
    extensions::*,
    state::State,
};

/// Create Discount Code Handler
#[endpoint(
    tags("discount-codes"),
    summary = "Create Discount Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Discount code created"),
        (status_code = StatusCode::CONFLICT, description = "Discount code already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateDiscountCodeRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<DiscountCodeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .app
        .discount_codes
        .create(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/discount-codes/{}", record.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(record.into()))
}
