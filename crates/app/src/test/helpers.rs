//! Test Helpers

use jiff::{Timestamp, ToSpan};
use pricebook::{
    discounts::{CouponCode, DiscountValue, DiscountWindow, ProductScope},
    products::ProductId,
};
use rust_decimal::Decimal;
use testresult::TestResult;

use crate::domain::{
    discount_codes::data::{DiscountCodeDetails, NewDiscountCode},
    orders::data::{CheckoutItem, CheckoutRequest, CustomerDetails},
};

/// A window running from a day ago to thirty days ahead.
pub(crate) fn current_window() -> TestResult<DiscountWindow> {
    let now = Timestamp::now();

    Ok(DiscountWindow::new(now - 24.hours(), now + 720.hours())?)
}

/// Validated, active code fields.
pub(crate) fn details(
    code: &str,
    percent: u8,
    product_ids: ProductScope,
) -> TestResult<DiscountCodeDetails> {
    Ok(DiscountCodeDetails {
        code: CouponCode::parse(code)?,
        value: DiscountValue::try_from(percent)?,
        window: current_window()?,
        is_active: true,
        product_ids,
    })
}

/// Admin input for an active, unrestricted code; not validated.
pub(crate) fn new_discount_code(code: &str, percent: i64) -> TestResult<NewDiscountCode> {
    let window = current_window()?;

    Ok(NewDiscountCode {
        code: code.to_owned(),
        value: Decimal::from(percent),
        starts_at: window.starts_at(),
        ends_at: window.ends_at(),
        is_active: true,
        product_ids: vec![],
    })
}

pub(crate) fn customer() -> CustomerDetails {
    CustomerDetails {
        name: "Nguyen Van A".to_owned(),
        phone: "0901234567".to_owned(),
        email: Some("a@example.com".to_owned()),
        address: "12 Le Loi, District 1".to_owned(),
        note: None,
    }
}

pub(crate) fn item(product_uuid: ProductId, price: i64, quantity: u32) -> CheckoutItem {
    CheckoutItem {
        product_uuid,
        name: "Item".to_owned(),
        price,
        quantity,
    }
}

pub(crate) fn checkout_request(items: Vec<CheckoutItem>) -> CheckoutRequest {
    CheckoutRequest {
        customer: customer(),
        items,
        cod: true,
    }
}
