//! Discount windows

use jiff::Timestamp;
use serde::Serialize;
use thiserror::Error;

/// Errors raised when building a discount window.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DiscountWindowError {
    /// The window ends before it starts.
    #[error("window ends at {ends_at}, before it starts at {starts_at}")]
    EndsBeforeStart {
        /// Start of the rejected window
        starts_at: Timestamp,

        /// End of the rejected window
        ends_at: Timestamp,
    },
}

/// The inclusive period during which a discount code may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DiscountWindow {
    starts_at: Timestamp,
    ends_at: Timestamp,
}

impl DiscountWindow {
    /// Create a window. A window that starts and ends at the same instant is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountWindowError::EndsBeforeStart`] if `ends_at` precedes `starts_at`.
    pub fn new(starts_at: Timestamp, ends_at: Timestamp) -> Result<Self, DiscountWindowError> {
        if ends_at < starts_at {
            return Err(DiscountWindowError::EndsBeforeStart { starts_at, ends_at });
        }

        Ok(Self { starts_at, ends_at })
    }

    /// First instant of the window.
    pub const fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    /// Last instant of the window.
    pub const fn ends_at(&self) -> Timestamp {
        self.ends_at
    }

    /// Whether `now` lies within the window, both ends included.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.starts_at <= now && now <= self.ends_at
    }
}
