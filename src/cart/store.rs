//! Cart persistence

use std::sync::RwLock;

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::cart::Cart;

/// Errors raised by cart stores.
#[derive(Debug, Error, PartialEq)]
pub enum CartStoreError {
    /// The backing store could not be read or written.
    #[error("cart store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for a single shopper's cart.
///
/// Writers do not coordinate; the last saved cart wins.
pub trait CartStore<'a> {
    /// Load the persisted cart, or an empty cart if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the store cannot be read.
    fn load(&self) -> Result<Cart<'a>, CartStoreError>;

    /// Persist the cart, replacing whatever was saved before.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the store cannot be written.
    fn save(&self, cart: &Cart<'a>) -> Result<(), CartStoreError>;
}

/// In-process cart store.
#[derive(Debug)]
pub struct MemoryCartStore<'a> {
    currency: &'a Currency,
    cart: RwLock<Option<Cart<'a>>>,
}

impl<'a> MemoryCartStore<'a> {
    /// Create an empty store; loads yield empty carts in `currency`.
    #[must_use]
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            currency,
            cart: RwLock::new(None),
        }
    }
}

impl<'a> CartStore<'a> for MemoryCartStore<'a> {
    fn load(&self) -> Result<Cart<'a>, CartStoreError> {
        let guard = self
            .cart
            .read()
            .map_err(|error| CartStoreError::Unavailable(error.to_string()))?;

        Ok(guard
            .clone()
            .unwrap_or_else(|| Cart::new(self.currency)))
    }

    fn save(&self, cart: &Cart<'a>) -> Result<(), CartStoreError> {
        let mut guard = self
            .cart
            .write()
            .map_err(|error| CartStoreError::Unavailable(error.to_string()))?;

        *guard = Some(cart.clone());

        Ok(())
    }
}
