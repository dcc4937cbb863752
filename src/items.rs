//! Items

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::TotalPriceError,
    products::{Product, ProductId},
};

/// A cart line: one product and how many of it.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem<'a> {
    /// The product on this line
    pub product: Product<'a>,

    /// Number of units, always positive inside a cart
    pub quantity: u32,
}

impl<'a> CartItem<'a> {
    /// Creates a new cart line.
    pub fn new(product: Product<'a>, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns the product identifier of this line.
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Returns the live unit price of this line.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.product.price
    }

    /// Calculates `price * quantity` for this line.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the line total cannot be represented.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        let minor = self
            .price()
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(TotalPriceError::Overflow(self.product.id))?;

        Ok(Money::from_minor(minor, self.price().currency()))
    }
}
