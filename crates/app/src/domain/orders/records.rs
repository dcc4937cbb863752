//! Order Records

use jiff::Timestamp;
use pricebook::products::ProductId;
use serde::Serialize;

use crate::{
    domain::orders::{
        data::{CustomerDetails, OrderQuote},
        payment_code::PaymentCode,
        status::{OrderStatus, PaymentStatus},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order line, priced at the time the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemRecord {
    pub product_uuid: ProductId,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub payment_code: PaymentCode,
    pub customer: CustomerDetails,
    pub cod: bool,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub pricing: OrderQuote,
    pub items: Vec<OrderItemRecord>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
