//! Discount eligibility

use jiff::Timestamp;
use rustc_hash::FxHashSet;

use crate::{discounts::DiscountCode, products::ProductId};

/// Codes that a cart holding `product_ids` may use at `now`, in input order.
///
/// A code qualifies when it is usable at `now` and is either unrestricted or scoped to at
/// least one product in the cart. An empty result simply means no discount.
pub fn eligible_codes<'c>(
    codes: &'c [DiscountCode],
    product_ids: impl IntoIterator<Item = ProductId>,
    now: Timestamp,
) -> Vec<&'c DiscountCode> {
    let in_cart: FxHashSet<ProductId> = product_ids.into_iter().collect();

    codes
        .iter()
        .filter(|code| code.is_usable_at(now))
        .filter(|code| {
            code.is_unrestricted() || code.product_ids.iter().any(|id| in_cart.contains(id))
        })
        .collect()
}
