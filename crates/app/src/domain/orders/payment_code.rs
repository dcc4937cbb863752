//! Payment codes

use std::fmt::{Display, Formatter, Result as FmtResult};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFIX: &str = "DH";
const SUFFIX_LENGTH: usize = 6;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("payment code must be \"DH\" followed by six uppercase letters or digits")]
pub struct InvalidPaymentCode;

/// Reference shoppers quote when paying and tracking an order, e.g. `DH4K9Z2Q`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentCode(String);

impl PaymentCode {
    /// Generate a random code using the thread-local generator.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with(rng: &mut impl Rng) -> Self {
        let suffix: String = (0..SUFFIX_LENGTH)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect();

        Self(format!("{PREFIX}{suffix}"))
    }

    /// # Errors
    ///
    /// Returns [`InvalidPaymentCode`] if `input` is not `DH` plus six uppercase letters or
    /// digits.
    pub fn parse(input: &str) -> Result<Self, InvalidPaymentCode> {
        let suffix = input.strip_prefix(PREFIX).ok_or(InvalidPaymentCode)?;

        let valid = suffix.len() == SUFFIX_LENGTH
            && suffix
                .bytes()
                .all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit());

        if !valid {
            return Err(InvalidPaymentCode);
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PaymentCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PaymentCode {
    type Error = InvalidPaymentCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PaymentCode> for String {
    fn from(value: PaymentCode) -> Self {
        value.0
    }
}
