//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, ToSpan};
use pricebook::{
    discounts::{CouponCode, DiscountValue, DiscountWindow, ProductScope},
    pricing::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD},
    products::ProductId,
};
use pricebook_app::{
    context::AppContext,
    domain::{
        discount_codes::{
            MockDiscountCodesService,
            records::{DiscountCodeRecord, DiscountCodeUuid},
        },
        orders::{
            MockCheckoutService,
            data::{CustomerDetails, OrderQuote},
            payment_code::PaymentCode,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            status::{OrderStatus, PaymentStatus},
        },
    },
};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use crate::state::State;

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

pub(crate) fn state(
    discount_codes: MockDiscountCodesService,
    checkout: MockCheckoutService,
) -> Arc<State> {
    let app = AppContext {
        discount_codes: Arc::new(discount_codes),
        checkout: Arc::new(checkout),
    };

    State::shared(app, Some(TEST_ADMIN_TOKEN.to_owned()))
}

/// State whose services must never be called.
pub(crate) fn state_with_token(admin_token: Option<&str>) -> Arc<State> {
    let app = AppContext {
        discount_codes: Arc::new(MockDiscountCodesService::new()),
        checkout: Arc::new(MockCheckoutService::new()),
    };

    State::shared(app, admin_token.map(str::to_owned))
}

pub(crate) fn discount_codes_service(
    discount_codes: MockDiscountCodesService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(discount_codes, MockCheckoutService::new())))
            .push(route),
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(MockDiscountCodesService::new(), checkout)))
            .push(route),
    )
}

pub(crate) fn bearer() -> String {
    format!("Bearer {TEST_ADMIN_TOKEN}")
}

pub(crate) fn make_discount_code(
    uuid: DiscountCodeUuid,
    code: &str,
    percent: u8,
    product_ids: ProductScope,
) -> TestResult<DiscountCodeRecord> {
    let now = Timestamp::now();

    Ok(DiscountCodeRecord {
        uuid,
        code: CouponCode::parse(code)?,
        value: DiscountValue::try_from(percent)?,
        window: DiscountWindow::new(now - 24.hours(), now + 720.hours())?,
        is_active: true,
        product_ids,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}

pub(crate) fn make_quote(subtotal: i64) -> OrderQuote {
    let shipping_fee = if subtotal >= FREE_SHIPPING_THRESHOLD {
        0
    } else {
        FLAT_SHIPPING_FEE
    };

    OrderQuote {
        subtotal,
        shipping_fee,
        original_total: subtotal + shipping_fee,
        discount_amount: 0,
        total: subtotal + shipping_fee,
        item_count: 1,
        discount: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, payment_code: &str) -> TestResult<OrderRecord> {
    let product_uuid = ProductId::generate();

    Ok(OrderRecord {
        uuid,
        payment_code: PaymentCode::parse(payment_code)?,
        customer: CustomerDetails {
            name: "Nguyen Van A".to_owned(),
            phone: "0901234567".to_owned(),
            email: None,
            address: "12 Le Loi, District 1".to_owned(),
            note: None,
        },
        cod: true,
        status: OrderStatus::PendingConfirmation,
        payment_status: PaymentStatus::Cod,
        pricing: make_quote(200_000),
        items: vec![OrderItemRecord {
            product_uuid,
            name: "Lamp".to_owned(),
            unit_price: 200_000,
            quantity: 1,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}
