//! Discount amount calculation

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    discounts::{DiscountCode, DiscountError, percent_of_minor},
    pricing::TotalPriceError,
};

/// Sum of the line totals in `cart` that `code` may discount.
///
/// # Errors
///
/// Returns a [`TotalPriceError`] if a line total or the running sum cannot be represented.
pub fn discountable_base<'a>(
    code: &DiscountCode,
    cart: &Cart<'a>,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    cart.iter()
        .filter(|item| code.applies_to(item.product_id()))
        .try_fold(Money::from_minor(0, cart.currency()), |acc, item| {
            Ok(acc.add(item.line_total()?)?)
        })
}

/// Amount `code` takes off `cart`: its percentage of the discountable base, rounded half away
/// from zero to whole minor units.
///
/// A code that matches nothing in the cart is worth zero rather than an error.
///
/// # Errors
///
/// Returns a [`DiscountError`] on arithmetic overflow or currency mismatch.
pub fn discount_amount<'a>(
    code: &DiscountCode,
    cart: &Cart<'a>,
) -> Result<Money<'a, Currency>, DiscountError> {
    let base = discountable_base(code, cart)?;
    let amount = percent_of_minor(&code.value, base.to_minor_units())?;

    Ok(Money::from_minor(amount, cart.currency()))
}
