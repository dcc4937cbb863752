//! Checkout input and order snapshots.

use pricebook::{
    discounts::{CouponCode, DiscountValue},
    products::ProductId,
    receipt::Receipt,
};
use serde::{Deserialize, Serialize};

use crate::domain::{
    discount_codes::records::DiscountCodeUuid,
    orders::{
        payment_code::PaymentCode,
        records::{OrderItemRecord, OrderUuid},
        status::{OrderStatus, PaymentStatus},
    },
    validation::FieldErrors,
};

/// Who the order ships to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl CustomerDetails {
    /// Reject blank required fields and malformed e-mail addresses.
    pub fn validate(&self, errors: &mut FieldErrors) {
        let required = [
            ("customer.name", &self.name),
            ("customer.phone", &self.phone),
            ("customer.address", &self.address),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(field, "must not be blank");
            }
        }

        if self
            .email
            .as_deref()
            .map(str::trim)
            .is_some_and(|email| !email.is_empty() && !email.contains('@'))
        {
            errors.push("customer.email", "must be an e-mail address");
        }
    }

    /// Trim whitespace and drop blank optional fields.
    #[must_use]
    pub fn normalized(self) -> Self {
        let optional = |value: Option<String>| {
            value
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        Self {
            name: self.name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            email: optional(self.email),
            address: self.address.trim().to_owned(),
            note: optional(self.note),
        }
    }
}

/// One cart line as submitted by the storefront, priced in VND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_uuid: ProductId,
    pub name: String,
    pub price: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub customer: CustomerDetails,
    pub items: Vec<CheckoutItem>,
    #[serde(default)]
    pub cod: bool,
}

/// Admin status change; absent fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Discount applied to a quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotedDiscount {
    pub uuid: DiscountCodeUuid,
    pub code: CouponCode,
    pub value: DiscountValue,
    pub amount: i64,
}

/// Priced cart in minor units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderQuote {
    pub subtotal: i64,
    pub shipping_fee: i64,
    pub original_total: i64,
    pub discount_amount: i64,
    pub total: i64,
    pub item_count: u64,
    pub discount: Option<QuotedDiscount>,
}

impl From<&Receipt<'_>> for OrderQuote {
    fn from(receipt: &Receipt<'_>) -> Self {
        let totals = receipt.totals();

        Self {
            subtotal: receipt.subtotal().to_minor_units(),
            shipping_fee: receipt.shipping_fee().to_minor_units(),
            original_total: totals.original_total.to_minor_units(),
            discount_amount: totals.discount_amount.to_minor_units(),
            total: totals.final_total.to_minor_units(),
            item_count: receipt.item_count(),
            discount: receipt.discount().map(|applied| QuotedDiscount {
                uuid: DiscountCodeUuid::from_uuid(applied.id.into_uuid()),
                code: applied.code.clone(),
                value: applied.value,
                amount: applied.amount.to_minor_units(),
            }),
        }
    }
}

/// A fully priced order ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub payment_code: PaymentCode,
    pub customer: CustomerDetails,
    pub cod: bool,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub pricing: OrderQuote,
    pub items: Vec<OrderItemRecord>,
}
