//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product Identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a new, time-ordered product identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Return the wrapped UUID.
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ProductId {
    fn from(value: Uuid) -> Self {
        Self::from_uuid(value)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Live unit price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a new product.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money<'a, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}
