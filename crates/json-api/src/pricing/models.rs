//! Pricing Models

use pricebook::{money::format_price, products::ProductId};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::VND};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pricebook_app::domain::orders::data::{CheckoutItem, OrderQuote, QuotedDiscount};

/// Cart line, priced in VND
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    pub product_uuid: Uuid,
    pub name: String,

    /// Unit price in minor units
    pub price: i64,

    pub quantity: u32,
}

impl From<CartItemRequest> for CheckoutItem {
    fn from(request: CartItemRequest) -> Self {
        CheckoutItem {
            product_uuid: ProductId::from(request.product_uuid),
            name: request.name,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Render minor units of VND for display.
pub(crate) fn display_vnd(minor: i64) -> String {
    format_price(&Money::from_minor(minor, VND))
}

/// Discount applied to a quote
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuotedDiscountResponse {
    pub uuid: Uuid,
    pub code: String,

    #[salvo(schema(value_type = String))]
    pub value: Decimal,

    pub amount: i64,
}

impl From<QuotedDiscount> for QuotedDiscountResponse {
    fn from(discount: QuotedDiscount) -> Self {
        QuotedDiscountResponse {
            uuid: discount.uuid.into(),
            code: discount.code.to_string(),
            value: discount.value.percent(),
            amount: discount.amount,
        }
    }
}

/// Quote amounts formatted for display
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteDisplay {
    pub subtotal: String,
    pub shipping_fee: String,
    pub original_total: String,
    pub discount_amount: String,
    pub total: String,
}

/// Priced cart; amounts are minor units of VND
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub original_total: i64,
    pub discount_amount: i64,
    pub total: i64,
    pub item_count: u64,
    pub discount: Option<QuotedDiscountResponse>,
    pub display: QuoteDisplay,
}

impl From<OrderQuote> for QuoteResponse {
    fn from(quote: OrderQuote) -> Self {
        let display = QuoteDisplay {
            subtotal: display_vnd(quote.subtotal),
            shipping_fee: display_vnd(quote.shipping_fee),
            original_total: display_vnd(quote.original_total),
            discount_amount: display_vnd(quote.discount_amount),
            total: display_vnd(quote.total),
        };

        QuoteResponse {
            subtotal: quote.subtotal,
            shipping_fee: quote.shipping_fee,
            original_total: quote.original_total,
            discount_amount: quote.discount_amount,
            total: quote.total,
            item_count: quote.item_count,
            discount: quote.discount.map(Into::into),
            display,
        }
    }
}
