//! Pricing
//!
//! Subtotals, the shipping fee policy and final order total composition.

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{items::CartItem, products::ProductId};

/// Subtotal at or above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 500_000;

/// Flat shipping fee charged below the free shipping threshold.
pub const FLAT_SHIPPING_FEE: i64 = 30_000;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total or running sum could not be represented.
    #[error("total for product {0} overflowed")]
    Overflow(ProductId),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the total price of a list of cart lines.
///
/// An empty list totals zero in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total could not be represented.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a>(
    items: &[CartItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    items
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, item| {
            Ok(acc.add(item.line_total()?)?)
        })
}

/// Shipping fee policy: flat fee below a threshold, free at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    free_threshold: i64,
    flat_fee: i64,
}

impl ShippingPolicy {
    /// Create a policy from minor-unit amounts.
    pub const fn new(free_threshold: i64, flat_fee: i64) -> Self {
        Self {
            free_threshold,
            flat_fee,
        }
    }

    /// Subtotal at or above which shipping is free.
    pub const fn free_threshold(&self) -> i64 {
        self.free_threshold
    }

    /// Fee charged below the threshold.
    pub const fn flat_fee(&self) -> i64 {
        self.flat_fee
    }

    /// Shipping fee for the given subtotal.
    pub fn fee<'a>(&self, subtotal: &Money<'a, Currency>) -> Money<'a, Currency> {
        let fee = if subtotal.to_minor_units() >= self.free_threshold {
            0
        } else {
            self.flat_fee
        };

        Money::from_minor(fee, subtotal.currency())
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::new(FREE_SHIPPING_THRESHOLD, FLAT_SHIPPING_FEE)
    }
}

/// Shipping fee for a subtotal under the default policy.
pub fn shipping_fee<'a>(subtotal: &Money<'a, Currency>) -> Money<'a, Currency> {
    ShippingPolicy::default().fee(subtotal)
}

/// The composed totals of an order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals<'a> {
    /// Subtotal plus shipping, before any discount
    pub original_total: Money<'a, Currency>,

    /// Discount subtracted from the original total
    pub discount_amount: Money<'a, Currency>,

    /// Amount payable, never below zero
    pub final_total: Money<'a, Currency>,

    clamped: bool,
}

impl OrderTotals<'_> {
    /// Whether the discount exceeded the original total and the final total was floored at zero.
    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}

/// Combine subtotal, shipping fee and an optional discount amount into order totals.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the amounts are in different currencies.
pub fn compose_total<'a>(
    subtotal: Money<'a, Currency>,
    shipping_fee: Money<'a, Currency>,
    discount: Option<Money<'a, Currency>>,
) -> Result<OrderTotals<'a>, MoneyError> {
    let currency = subtotal.currency();
    let original_total = subtotal.add(shipping_fee)?;
    let discount_amount = discount.unwrap_or_else(|| Money::from_minor(0, currency));
    let remaining = original_total.sub(discount_amount)?;

    let clamped = remaining.to_minor_units() < 0;

    let final_total = if clamped {
        Money::from_minor(0, currency)
    } else {
        remaining
    };

    Ok(OrderTotals {
        original_total,
        discount_amount,
        final_total,
        clamped,
    })
}
