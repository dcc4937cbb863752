//! Product Badges Handler

use std::sync::Arc;

use jiff::Timestamp;
use pricebook::{
    products::{Product, ProductId},
    receipt::ProductBadge,
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::VND};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pricebook_app::domain::discount_codes::records::DiscountCodeRecord;

use crate::{
    discount_codes::errors::into_status_error, extensions::*, pricing::models::display_vnd,
    state::State,
};

/// Product listed in the storefront
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BadgeProductRequest {
    pub product_uuid: Uuid,
    pub name: String,

    /// Unit price in minor units
    pub price: i64,
}

/// Badges Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BadgesRequest {
    pub products: Vec<BadgeProductRequest>,
}

/// Best discount for one unit of a product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductBadgeResponse {
    pub product_uuid: Uuid,
    pub code: String,

    #[salvo(schema(value_type = String))]
    pub value: Decimal,

    pub amount: i64,
    pub discounted_price: i64,
    pub display_discounted_price: String,
}

impl From<ProductBadge<'_>> for ProductBadgeResponse {
    fn from(badge: ProductBadge<'_>) -> Self {
        let discounted_price = badge.discounted_price.to_minor_units();

        ProductBadgeResponse {
            product_uuid: badge.product.into_uuid(),
            code: badge.code.to_string(),
            value: badge.value.percent(),
            amount: badge.amount.to_minor_units(),
            discounted_price,
            display_discounted_price: display_vnd(discounted_price),
        }
    }
}

/// Badges Response; products without a usable code are left out
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BadgesResponse {
    pub badges: Vec<ProductBadgeResponse>,
}

/// Product Badges Handler
///
/// Finds the best usable discount code for each listed product.
#[endpoint(
    tags("pricing"),
    summary = "Product Discount Badges",
    responses(
        (status_code = StatusCode::OK, description = "Badges for discounted products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BadgesRequest>,
    depot: &mut Depot,
) -> Result<Json<BadgesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    if request.products.iter().any(|product| product.price < 0) {
        return Err(StatusError::bad_request().brief("products.price: must not be negative"));
    }

    let now = Timestamp::now();

    let codes: Vec<_> = state
        .app
        .discount_codes
        .list_active(now)
        .await
        .map_err(into_status_error)?
        .iter()
        .map(DiscountCodeRecord::to_discount_code)
        .collect();

    let mut badges = Vec::new();

    for listed in request.products {
        let product = Product::new(
            ProductId::from(listed.product_uuid),
            listed.name,
            Money::from_minor(listed.price, VND),
        );

        if let Some(badge) =
            ProductBadge::for_product(&codes, &product, now).or_500("failed to compute badge")?
        {
            badges.push(badge.into());
        }
    }

    Ok(Json(BadgesResponse { badges }))
}
