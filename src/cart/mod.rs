//! Cart
//!
//! An immutable cart value driven by [`CartAction`]s. Every action produces a new cart; line
//! items stay unique by product and derived totals are always recomputed from the lines.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::CartItem,
    pricing::{TotalPriceError, total_price},
    products::{Product, ProductId},
};

mod store;

pub use store::{CartStore, CartStoreError, MemoryCartStore};

/// Errors raised while applying cart actions.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product is priced in a different currency than the cart.
    ///
    /// Carries the product, its currency and the cart's currency.
    #[error("product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// A product was added with a quantity of zero.
    #[error("cannot add product {0} with a quantity of zero")]
    InvalidQuantity(ProductId),

    /// The resulting quantity of a line does not fit.
    #[error("quantity of product {0} overflowed")]
    QuantityOverflow(ProductId),
}

/// Cart Action
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction<'a> {
    /// Add units of a product, merging into an existing line if present.
    AddItem {
        /// Product to add
        product: Product<'a>,

        /// Units to add
        quantity: u32,
    },

    /// Remove a product line entirely.
    RemoveItem(ProductId),

    /// Set the quantity of an existing line; zero or below removes it.
    SetQuantity {
        /// Product whose line is changed
        product: ProductId,

        /// New quantity
        quantity: i64,
    },

    /// Remove every line.
    Clear,

    /// Replace the contents with previously persisted lines.
    Load(Vec<CartItem<'a>>),
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a cart holding one unit of `product`, in the product's currency.
    #[must_use]
    pub fn single(product: Product<'a>) -> Self {
        let currency = product.price.currency();

        Cart {
            items: vec![CartItem::new(product, 1)],
            currency,
        }
    }

    /// Create a cart from a list of lines, merging duplicate products.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a line's currency differs from the cart currency or a merged
    /// quantity overflows.
    pub fn with_items(
        items: impl Into<Vec<CartItem<'a>>>,
        currency: &'a Currency,
    ) -> Result<Self, CartError> {
        Self::new(currency).apply(CartAction::Load(items.into()))
    }

    /// Apply an action, producing the next cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if the action would break a cart invariant; the previous cart is
    /// consumed either way, so callers that need to keep it should clone first.
    pub fn apply(mut self, action: CartAction<'a>) -> Result<Self, CartError> {
        match action {
            CartAction::AddItem { product, quantity } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity(product.id));
                }

                self.merge(CartItem::new(product, quantity))?;
            }
            CartAction::RemoveItem(product) => {
                self.items.retain(|item| item.product_id() != product);
            }
            CartAction::SetQuantity { product, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|item| item.product_id() != product);
                } else if let Some(item) = self
                    .items
                    .iter_mut()
                    .find(|item| item.product_id() == product)
                {
                    item.quantity = u32::try_from(quantity)
                        .map_err(|_overflow| CartError::QuantityOverflow(product))?;
                }
            }
            CartAction::Clear => self.items.clear(),
            CartAction::Load(items) => {
                self.items.clear();

                for item in items.into_iter().filter(|item| item.quantity > 0) {
                    self.merge(item)?;
                }
            }
        }

        Ok(self)
    }

    fn merge(&mut self, incoming: CartItem<'a>) -> Result<(), CartError> {
        let incoming_currency = incoming.price().currency();

        if incoming_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                incoming.product_id(),
                incoming_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id() == incoming.product_id())
        {
            existing.quantity = existing
                .quantity
                .checked_add(incoming.quantity)
                .ok_or(CartError::QuantityOverflow(incoming.product_id()))?;

            return Ok(());
        }

        self.items.push(incoming);

        Ok(())
    }

    /// Sum of `price * quantity` across all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total cannot be represented.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.items, self.currency)
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Product identifiers in line order.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.items.iter().map(CartItem::product_id)
    }

    /// Find the line for a product.
    pub fn get(&self, product: ProductId) -> Option<&CartItem<'a>> {
        self.items.iter().find(|item| item.product_id() == product)
    }

    /// The lines of the cart, in insertion order.
    pub fn items(&self) -> &[CartItem<'a>] {
        &self.items
    }

    /// Iterate over the lines of the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem<'a>> {
        self.items.iter()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The cart currency.
    #[must_use]
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}
