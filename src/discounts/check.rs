//! Public code check

use jiff::Timestamp;
use thiserror::Error;

use crate::{discounts::DiscountCode, products::ProductId};

/// Reasons a shopper-entered code cannot be used.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheckError {
    /// No code with that text exists.
    #[error("discount code not found")]
    NotFound,

    /// The code exists but is switched off or outside its window.
    #[error("discount code is not active")]
    Inactive,

    /// The code is usable but not for the given product.
    #[error("discount code does not apply to product {0}")]
    ProductNotAllowed(ProductId),
}

/// Check a looked-up code for use at `now`, optionally against one product.
///
/// Checks run in order: existence, then activity, then product scope.
///
/// # Errors
///
/// Returns the first [`CodeCheckError`] that applies.
pub fn check_code(
    found: Option<&DiscountCode>,
    product: Option<ProductId>,
    now: Timestamp,
) -> Result<&DiscountCode, CodeCheckError> {
    let code = found.ok_or(CodeCheckError::NotFound)?;

    if !code.is_usable_at(now) {
        return Err(CodeCheckError::Inactive);
    }

    if let Some(product) = product.filter(|product| !code.applies_to(*product)) {
        return Err(CodeCheckError::ProductNotAllowed(product));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::discounts::{
        CouponCode, DiscountCodeId, DiscountValue, DiscountWindow, ProductScope,
    };

    use super::*;

    fn code(is_active: bool, product_ids: ProductScope) -> TestResult<DiscountCode> {
        let now = Timestamp::from_second(1_700_000_000)?;

        Ok(DiscountCode {
            id: DiscountCodeId::generate(),
            code: CouponCode::parse("CHECK1")?,
            value: DiscountValue::try_from(15_u8)?,
            window: DiscountWindow::new(now - 24.hours(), now + 24.hours())?,
            is_active,
            product_ids,
        })
    }

    #[test]
    fn missing_code_is_not_found() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;

        assert_eq!(check_code(None, None, now), Err(CodeCheckError::NotFound));

        Ok(())
    }

    #[test]
    fn disabled_code_is_inactive_even_for_wrong_product() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;
        let disabled = code(false, smallvec![ProductId::generate()])?;

        assert_eq!(
            check_code(Some(&disabled), Some(ProductId::generate()), now),
            Err(CodeCheckError::Inactive)
        );

        Ok(())
    }

    #[test]
    fn expired_code_is_inactive() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;
        let enabled = code(true, smallvec![])?;

        assert_eq!(
            check_code(Some(&enabled), None, now + 48.hours()),
            Err(CodeCheckError::Inactive)
        );

        Ok(())
    }

    #[test]
    fn scoped_code_rejects_other_product() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;
        let listed = ProductId::generate();
        let other = ProductId::generate();
        let scoped = code(true, smallvec![listed])?;

        assert_eq!(
            check_code(Some(&scoped), Some(other), now),
            Err(CodeCheckError::ProductNotAllowed(other))
        );
        assert_eq!(check_code(Some(&scoped), Some(listed), now), Ok(&scoped));
        assert_eq!(check_code(Some(&scoped), None, now), Ok(&scoped));

        Ok(())
    }

    #[test]
    fn unrestricted_code_accepts_any_product() -> TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;
        let open = code(true, smallvec![])?;

        assert_eq!(
            check_code(Some(&open), Some(ProductId::generate()), now),
            Ok(&open)
        );

        Ok(())
    }
}
