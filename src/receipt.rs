//! Receipt
//!
//! Priced snapshot of a cart: subtotal, shipping, the best usable discount code and the final
//! totals.

use jiff::Timestamp;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    cart::Cart,
    discounts::{
        CouponCode, DiscountCode, DiscountCodeId, DiscountError, DiscountValue, best_discount,
        best_discount_for_product, eligible_codes,
    },
    pricing::{OrderTotals, ShippingPolicy, TotalPriceError, compose_total},
    products::{Product, ProductId},
};

/// Errors that can occur when building a receipt.
#[derive(Debug, Error, PartialEq)]
pub enum ReceiptError {
    /// Error calculating the cart subtotal.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error calculating a discount amount.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The discount code a receipt was priced with.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount<'a> {
    /// Code identifier
    pub id: DiscountCodeId,

    /// Code text
    pub code: CouponCode,

    /// Percentage of the code
    pub value: DiscountValue,

    /// Amount taken off
    pub amount: Money<'a, Currency>,
}

impl<'a> AppliedDiscount<'a> {
    fn new(code: &DiscountCode, amount: Money<'a, Currency>) -> Self {
        Self {
            id: code.id,
            code: code.code.clone(),
            value: code.value,
            amount,
        }
    }
}

/// Priced cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt<'a> {
    subtotal: Money<'a, Currency>,
    shipping_fee: Money<'a, Currency>,
    discount: Option<AppliedDiscount<'a>>,
    totals: OrderTotals<'a>,
    item_count: u64,
}

impl<'a> Receipt<'a> {
    /// Price `cart` at `now`, selecting the most valuable usable code from `codes`.
    ///
    /// Shipping is charged on the undiscounted subtotal. A best code worth nothing is not
    /// recorded as applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if any amount cannot be computed.
    pub fn quote(
        cart: &Cart<'a>,
        codes: &[DiscountCode],
        now: Timestamp,
        policy: &ShippingPolicy,
    ) -> Result<Self, ReceiptError> {
        let subtotal = cart.total()?;
        let shipping_fee = policy.fee(&subtotal);

        let eligible = eligible_codes(codes, cart.product_ids(), now);

        let discount = best_discount(eligible, cart)?
            .filter(|best| best.amount.to_minor_units() > 0)
            .map(|best| AppliedDiscount::new(best.code, best.amount));

        let totals = compose_total(
            subtotal,
            shipping_fee,
            discount.as_ref().map(|applied| applied.amount),
        )?;

        Ok(Self {
            subtotal,
            shipping_fee,
            discount,
            totals,
            item_count: cart.item_count(),
        })
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Shipping charged for the subtotal.
    pub fn shipping_fee(&self) -> Money<'a, Currency> {
        self.shipping_fee
    }

    /// The applied discount, if any.
    pub fn discount(&self) -> Option<&AppliedDiscount<'a>> {
        self.discount.as_ref()
    }

    /// Subtotal plus shipping, discount and payable amount.
    pub fn totals(&self) -> &OrderTotals<'a> {
        &self.totals
    }

    /// Amount payable.
    pub fn total(&self) -> Money<'a, Currency> {
        self.totals.final_total
    }

    /// Number of units priced.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }
}

/// Best discount shown next to a product in listings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductBadge<'a> {
    /// Product the badge belongs to
    pub product: ProductId,

    /// Code that gives the discount
    pub code: CouponCode,

    /// Percentage of the code
    pub value: DiscountValue,

    /// Amount taken off one unit
    pub amount: Money<'a, Currency>,

    /// Unit price after the discount
    pub discounted_price: Money<'a, Currency>,
}

impl<'a> ProductBadge<'a> {
    /// Badge for one unit of `product`, or `None` if no usable code takes anything off.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the discount cannot be computed.
    pub fn for_product(
        codes: &[DiscountCode],
        product: &Product<'a>,
        now: Timestamp,
    ) -> Result<Option<Self>, ReceiptError> {
        let Some(best) = best_discount_for_product(codes, product, now)? else {
            return Ok(None);
        };

        if best.amount.to_minor_units() <= 0 {
            return Ok(None);
        }

        Ok(Some(Self {
            product: product.id,
            code: best.code.code.clone(),
            value: best.code.value,
            amount: best.amount,
            discounted_price: product.price.sub(best.amount)?,
        }))
    }
}
