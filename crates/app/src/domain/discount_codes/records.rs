//! Discount Code Records

use jiff::Timestamp;
use pricebook::discounts::{
    CouponCode, DiscountCode, DiscountCodeId, DiscountValue, DiscountWindow, ProductScope,
};

use crate::uuids::TypedUuid;

/// Discount Code UUID
pub type DiscountCodeUuid = TypedUuid<DiscountCodeRecord>;

/// Discount Code Record
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCodeRecord {
    pub uuid: DiscountCodeUuid,
    pub code: CouponCode,
    pub value: DiscountValue,
    pub window: DiscountWindow,
    pub is_active: bool,
    pub product_ids: ProductScope,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DiscountCodeRecord {
    /// The pricing engine's view of this code.
    #[must_use]
    pub fn to_discount_code(&self) -> DiscountCode {
        DiscountCode {
            id: DiscountCodeId::from_uuid(self.uuid.into_uuid()),
            code: self.code.clone(),
            value: self.value,
            window: self.window,
            is_active: self.is_active,
            product_ids: self.product_ids.clone(),
        }
    }
}
