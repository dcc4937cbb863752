//! Pricebook
//!
//! Pricebook resolves time-bounded, product-scoped percentage discount codes against a
//! shopping cart and composes the final payable order total.

pub mod cart;
pub mod discounts;
pub mod items;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
