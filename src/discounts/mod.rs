//! Discounts
//!
//! Percentage discount codes that are bounded in time and optionally scoped to a set of
//! products, together with the engine that decides which codes a cart may use and what each
//! is worth.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::MoneyError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use uuid::Uuid;

use crate::{pricing::TotalPriceError, products::ProductId};

mod calculator;
mod check;
mod code;
mod eligibility;
mod selection;
mod value;
mod window;

pub use calculator::{discount_amount, discountable_base};
pub use check::{CodeCheckError, check_code};
pub use code::{COUPON_CODE_LENGTH, CouponCode, CouponCodeError};
pub use eligibility::eligible_codes;
pub use selection::{BestDiscount, best_discount, best_discount_for_product};
pub use value::{DiscountValue, DiscountValueError};
pub use window::{DiscountWindow, DiscountWindowError};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely represented in minor units.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Errors bubbled up from total price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Discount Code Identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountCodeId(Uuid);

impl DiscountCodeId {
    /// Generate a new, time-ordered identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Return the wrapped UUID.
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Display for DiscountCodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Product scope of a discount code; empty means every product.
pub type ProductScope = SmallVec<[ProductId; 4]>;

/// Discount Code
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCode {
    /// Identifier
    pub id: DiscountCodeId,

    /// The code shoppers type in
    pub code: CouponCode,

    /// Percentage taken off the discountable base
    pub value: DiscountValue,

    /// When the code may be used
    pub window: DiscountWindow,

    /// Manual on/off switch, independent of the window
    pub is_active: bool,

    /// Products the code is restricted to
    pub product_ids: ProductScope,
}

impl DiscountCode {
    /// Whether the code is switched on and `now` lies within its window (inclusive).
    pub fn is_usable_at(&self, now: Timestamp) -> bool {
        self.is_active && self.window.contains(now)
    }

    /// Whether the code applies to every product.
    pub fn is_unrestricted(&self) -> bool {
        self.product_ids.is_empty()
    }

    /// Whether the code may discount the given product.
    pub fn applies_to(&self, product: ProductId) -> bool {
        self.is_unrestricted() || self.product_ids.contains(&product)
    }
}

/// Take `value` percent of a minor-unit amount, rounding half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the result cannot be represented.
pub fn percent_of_minor(value: &DiscountValue, minor: i64) -> Result<i64, DiscountError> {
    let Some(applied) = Decimal::from(minor).checked_mul(value.percent()) else {
        return Err(DiscountError::PercentConversion);
    };

    let Some(fraction) = applied.checked_div(Decimal::ONE_HUNDRED) else {
        return Err(DiscountError::PercentConversion);
    };

    fraction
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
