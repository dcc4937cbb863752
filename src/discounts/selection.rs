//! Best discount selection

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    discounts::{DiscountCode, DiscountError, discount_amount, eligible_codes},
    products::Product,
};

/// The winning code together with the amount it takes off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestDiscount<'c, 'a> {
    /// The selected code
    pub code: &'c DiscountCode,

    /// What the code is worth against the cart it was selected for
    pub amount: Money<'a, Currency>,
}

/// Pick the code worth the most against `cart`.
///
/// Returns `None` when `codes` is empty. Ties keep the code that came first.
///
/// # Errors
///
/// Returns a [`DiscountError`] if any candidate's amount cannot be computed.
pub fn best_discount<'c, 'a>(
    codes: impl IntoIterator<Item = &'c DiscountCode>,
    cart: &Cart<'a>,
) -> Result<Option<BestDiscount<'c, 'a>>, DiscountError> {
    let mut best: Option<BestDiscount<'c, 'a>> = None;

    for code in codes {
        let amount = discount_amount(code, cart)?;

        let better = best.is_none_or(|current| {
            amount.to_minor_units() > current.amount.to_minor_units()
        });

        if better {
            best = Some(BestDiscount { code, amount });
        }
    }

    Ok(best)
}

/// Best usable code for a single unit of `product`, as shown on product listings.
///
/// # Errors
///
/// Returns a [`DiscountError`] if the product cannot be priced.
pub fn best_discount_for_product<'c, 'a>(
    codes: &'c [DiscountCode],
    product: &Product<'a>,
    now: Timestamp,
) -> Result<Option<BestDiscount<'c, 'a>>, DiscountError> {
    let cart = Cart::single(product.clone());

    best_discount(eligible_codes(codes, [product.id], now), &cart)
}
