//! Pricebook Domain Concerns

pub mod discount_codes;
pub mod orders;
pub mod pagination;
pub mod validation;
