//! Discount Code Errors

use salvo::http::StatusError;
use tracing::error;

use pricebook_app::domain::discount_codes::DiscountCodesServiceError;

/// Rendered `brief` of a 422 for a code outside its window or disabled.
pub(crate) const INACTIVE: &str = "inactive";

/// Rendered `brief` of a 422 for a code scoped away from the requested product.
pub(crate) const PRODUCT_NOT_ALLOWED: &str = "product_not_allowed";

/// Validation failures render every rejected field as `field: message` pairs in `brief`, which
/// is the part of a [`StatusError`] the catcher writes to the client.
pub(crate) fn into_status_error(error: DiscountCodesServiceError) -> StatusError {
    match error {
        DiscountCodesServiceError::Validation(errors) => {
            StatusError::bad_request().brief(errors.to_string())
        }
        DiscountCodesServiceError::DuplicateCode => {
            StatusError::conflict().brief("Discount code already exists")
        }
        DiscountCodesServiceError::NotFound => {
            StatusError::not_found().brief("Discount code not found")
        }
        DiscountCodesServiceError::Inactive => StatusError::unprocessable_entity().brief(INACTIVE),
        DiscountCodesServiceError::ProductNotAllowed => {
            StatusError::unprocessable_entity().brief(PRODUCT_NOT_ALLOWED)
        }
        DiscountCodesServiceError::Storage(source) => {
            error!("discount code storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use pricebook_app::{database::StoreError, domain::validation::FieldErrors};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn validation_errors_carry_field_detail() {
        let mut errors = FieldErrors::new();

        errors.push("code", "must not be blank");
        errors.push("ends_at", "must not be before starts_at");

        let status = into_status_error(DiscountCodesServiceError::Validation(errors));

        assert_eq!(status.code, StatusCode::BAD_REQUEST, "status");
        assert_eq!(
            status.brief, "code: must not be blank; ends_at: must not be before starts_at",
            "fields"
        );
    }

    #[test]
    fn check_failures_are_unprocessable_with_kind() {
        let inactive = into_status_error(DiscountCodesServiceError::Inactive);
        let scoped = into_status_error(DiscountCodesServiceError::ProductNotAllowed);

        assert_eq!(inactive.code, StatusCode::UNPROCESSABLE_ENTITY, "inactive status");
        assert_eq!(inactive.brief, "inactive", "inactive kind");
        assert_eq!(scoped.code, StatusCode::UNPROCESSABLE_ENTITY, "scoped status");
        assert_eq!(scoped.brief, "product_not_allowed", "scoped kind");
    }

    #[test]
    fn storage_failures_are_opaque() {
        let status = into_status_error(DiscountCodesServiceError::Storage(StoreError::InvalidData));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR, "status");
        assert_eq!(status.detail, None, "no detail leaks");
    }
}
