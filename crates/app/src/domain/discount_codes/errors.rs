//! Discount codes service errors.

use pricebook::discounts::CodeCheckError;
use thiserror::Error;

use crate::{database::StoreError, domain::validation::FieldErrors};

#[derive(Debug, Error)]
pub enum DiscountCodesServiceError {
    #[error("invalid discount code: {0}")]
    Validation(FieldErrors),

    #[error("discount code already exists")]
    DuplicateCode,

    #[error("discount code not found")]
    NotFound,

    #[error("discount code is not active")]
    Inactive,

    #[error("discount code does not apply to this product")]
    ProductNotAllowed,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for DiscountCodesServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::DuplicateCode,
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl From<FieldErrors> for DiscountCodesServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<CodeCheckError> for DiscountCodesServiceError {
    fn from(error: CodeCheckError) -> Self {
        match error {
            CodeCheckError::NotFound => Self::NotFound,
            CodeCheckError::Inactive => Self::Inactive,
            CodeCheckError::ProductNotAllowed(_) => Self::ProductNotAllowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_duplicate_code() {
        assert!(matches!(
            DiscountCodesServiceError::from(StoreError::AlreadyExists),
            DiscountCodesServiceError::DuplicateCode
        ));
    }

    #[test]
    fn storage_failures_stay_opaque() {
        let error = DiscountCodesServiceError::from(StoreError::InvalidData);

        assert!(matches!(error, DiscountCodesServiceError::Storage(_)));
        assert_eq!(error.to_string(), "storage error");
    }
}
