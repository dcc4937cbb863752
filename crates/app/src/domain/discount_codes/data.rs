//! Discount Codes Data

use std::str::FromStr;

use jiff::Timestamp;
use pricebook::{
    discounts::{CouponCode, DiscountValue, DiscountWindow, ProductScope},
    products::ProductId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    discount_codes::records::DiscountCodeRecord, pagination::PageRequest,
    validation::FieldErrors,
};

/// New Discount Code Data, as submitted by an administrator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscountCode {
    pub code: String,
    pub value: Decimal,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub is_active: bool,
    pub product_ids: Vec<ProductId>,
}

impl NewDiscountCode {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldErrors`] of every invalid field.
    pub fn validate(self) -> Result<DiscountCodeDetails, FieldErrors> {
        let mut errors = FieldErrors::new();

        let code = errors.check("code", CouponCode::parse(&self.code));
        let value = errors.check("value", DiscountValue::new(self.value));
        let window = errors.check("ends_at", DiscountWindow::new(self.starts_at, self.ends_at));

        let mut product_ids = ProductScope::new();

        for product in self.product_ids {
            if !product_ids.contains(&product) {
                product_ids.push(product);
            }
        }

        match (code, value, window) {
            (Some(code), Some(value), Some(window)) => {
                Ok(DiscountCodeDetails {
                    code,
                    value,
                    window,
                    is_active: self.is_active,
                    product_ids,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Discount Code Update Data; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountCodeUpdate {
    pub code: Option<String>,
    pub value: Option<Decimal>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub product_ids: Option<Vec<ProductId>>,
}

impl DiscountCodeUpdate {
    /// Merge onto an existing record, producing the full set of fields to re-validate.
    #[must_use]
    pub fn merge(self, current: &DiscountCodeRecord) -> NewDiscountCode {
        NewDiscountCode {
            code: self.code.unwrap_or_else(|| current.code.to_string()),
            value: self.value.unwrap_or_else(|| current.value.percent()),
            starts_at: self.starts_at.unwrap_or(current.window.starts_at()),
            ends_at: self.ends_at.unwrap_or(current.window.ends_at()),
            is_active: self.is_active.unwrap_or(current.is_active),
            product_ids: self
                .product_ids
                .unwrap_or_else(|| current.product_ids.to_vec()),
        }
    }
}

/// Validated discount code fields, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCodeDetails {
    pub code: CouponCode,
    pub value: DiscountValue,
    pub window: DiscountWindow,
    pub is_active: bool,
    pub product_ids: ProductScope,
}

#[derive(Debug, Error)]
#[error("unknown status {0:?}, expected \"active\" or \"inactive\"")]
pub struct UnknownStatus(String);

/// Activation status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStatus {
    Active,
    Inactive,
}

impl CodeStatus {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for CodeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Admin listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountCodeFilter {
    pub status: Option<CodeStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Normalised listing query handed to stores.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCodeQuery {
    pub status: Option<CodeStatus>,
    pub search: Option<String>,
    pub page: PageRequest,
}

impl From<DiscountCodeFilter> for DiscountCodeQuery {
    fn from(filter: DiscountCodeFilter) -> Self {
        let search = filter
            .search
            .map(|search| search.trim().to_owned())
            .filter(|search| !search.is_empty());

        Self {
            status: filter.status,
            search,
            page: PageRequest::new(filter.page, filter.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::domain::discount_codes::records::DiscountCodeUuid;

    use super::*;

    fn new_code(code: &str, value: Decimal) -> TestResult<NewDiscountCode> {
        let starts_at = Timestamp::from_second(1_717_200_000)?;

        Ok(NewDiscountCode {
            code: code.to_owned(),
            value,
            starts_at,
            ends_at: starts_at + 720.hours(),
            is_active: true,
            product_ids: vec![],
        })
    }

    #[test]
    fn valid_code_passes() -> TestResult {
        let details = new_code("SUMMER", Decimal::from(15))?.validate()?;

        assert_eq!(details.code.as_str(), "SUMMER");
        assert_eq!(details.value.percent(), Decimal::from(15));
        assert!(details.is_active);

        Ok(())
    }

    #[test]
    fn lowercase_code_is_a_validation_error() -> TestResult {
        let result = new_code("ab12cd", Decimal::from(10))?.validate();

        assert!(matches!(result, Err(ref errors) if errors.contains("code")));

        Ok(())
    }

    #[test]
    fn all_invalid_fields_are_reported_together() -> TestResult {
        let mut input = new_code("BAD", Decimal::from(150))?;
        input.ends_at = input.starts_at - 24.hours();

        let Err(errors) = input.validate() else {
            return Err("expected validation errors".into());
        };

        assert_eq!(errors.len(), 3);
        assert!(errors.contains("code"));
        assert!(errors.contains("value"));
        assert!(errors.contains("ends_at"));

        Ok(())
    }

    #[test]
    fn duplicate_products_are_collapsed() -> TestResult {
        let product = ProductId::generate();
        let mut input = new_code("SCOPED", Decimal::from(5))?;
        input.product_ids = vec![product, product];

        let details = input.validate()?;

        assert_eq!(details.product_ids.as_slice(), &[product]);

        Ok(())
    }

    #[test]
    fn update_merges_onto_current_values() -> TestResult {
        let starts_at = Timestamp::from_second(1_717_200_000)?;
        let product = ProductId::generate();

        let current = DiscountCodeRecord {
            uuid: DiscountCodeUuid::new(),
            code: CouponCode::parse("WINTER")?,
            value: DiscountValue::try_from(20_u8)?,
            window: DiscountWindow::new(starts_at, starts_at + 240.hours())?,
            is_active: true,
            product_ids: smallvec![product],
            created_at: starts_at,
            updated_at: starts_at,
        };

        let merged = DiscountCodeUpdate {
            starts_at: Some(starts_at + 480.hours()),
            is_active: Some(false),
            ..DiscountCodeUpdate::default()
        }
        .merge(&current);

        assert_eq!(merged.code, "WINTER");
        assert_eq!(merged.value, Decimal::from(20));
        assert_eq!(merged.ends_at, starts_at + 240.hours());
        assert!(!merged.is_active);
        assert_eq!(merged.product_ids, vec![product]);

        let Err(errors) = merged.validate() else {
            return Err("expected the merged window to be rejected".into());
        };

        assert!(errors.contains("ends_at"));

        Ok(())
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = DiscountCodeQuery::from(DiscountCodeFilter {
            search: Some("   ".to_owned()),
            ..DiscountCodeFilter::default()
        });

        assert_eq!(query.search, None);
        assert_eq!(query.page, PageRequest::default());
    }

    #[test]
    fn status_parses_lowercase_names() {
        assert_eq!("active".parse::<CodeStatus>().ok(), Some(CodeStatus::Active));
        assert_eq!("inactive".parse::<CodeStatus>().ok(), Some(CodeStatus::Inactive));
        assert!("ACTIVE".parse::<CodeStatus>().is_err());
    }
}
