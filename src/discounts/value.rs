//! Discount values

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a discount value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiscountValueError {
    /// The percentage is not greater than 0 and at most 100.
    #[error("discount value must be greater than 0 and at most 100, got {0}")]
    OutOfRange(Decimal),
}

/// A percentage in the half-open range `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountValue(Decimal);

impl DiscountValue {
    /// Validate a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountValueError::OutOfRange`] if `percent` is zero, negative or above 100.
    pub fn new(percent: Decimal) -> Result<Self, DiscountValueError> {
        if percent <= Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DiscountValueError::OutOfRange(percent));
        }

        Ok(Self(percent.normalize()))
    }

    /// The percentage, e.g. `10` for ten percent.
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for DiscountValue {
    type Error = DiscountValueError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<u8> for DiscountValue {
    type Error = DiscountValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(Decimal::from(value))
    }
}

impl From<DiscountValue> for Decimal {
    fn from(value: DiscountValue) -> Self {
        value.0
    }
}
