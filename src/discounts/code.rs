//! Coupon codes

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of characters in every coupon code.
pub const COUPON_CODE_LENGTH: usize = 6;

/// Errors raised when parsing a coupon code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CouponCodeError {
    /// The code does not have exactly six characters.
    #[error("code must be exactly {COUPON_CODE_LENGTH} characters, got {0}")]
    Length(usize),

    /// The code contains something other than uppercase letters and digits.
    #[error("code may only contain uppercase letters A-Z and digits 0-9")]
    Characters,
}

/// A six character code of uppercase ASCII letters and digits.
///
/// Input is never case-folded: `"ab12cd"` is rejected rather than turned into `"AB12CD"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Parse and validate a coupon code.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponCodeError`] if the input is not six uppercase letters or digits.
    pub fn parse(input: &str) -> Result<Self, CouponCodeError> {
        let length = input.chars().count();

        if length != COUPON_CODE_LENGTH {
            return Err(CouponCodeError::Length(length));
        }

        if !input
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(CouponCodeError::Characters);
        }

        Ok(Self(input.to_owned()))
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CouponCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for CouponCode {
    type Err = CouponCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CouponCode> for String {
    fn from(value: CouponCode) -> Self {
        value.0
    }
}

impl AsRef<str> for CouponCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_uppercase_letters_and_digits() -> TestResult {
        let code = CouponCode::parse("AB12CD")?;

        assert_eq!(code.as_str(), "AB12CD");
        assert_eq!(code.to_string(), "AB12CD");

        Ok(())
    }

    #[test]
    fn rejects_lowercase_without_folding() {
        assert_eq!(CouponCode::parse("ab12cd"), Err(CouponCodeError::Characters));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(CouponCode::parse("ABC12"), Err(CouponCodeError::Length(5)));
        assert_eq!(CouponCode::parse("ABC1234"), Err(CouponCodeError::Length(7)));
        assert_eq!(CouponCode::parse(""), Err(CouponCodeError::Length(0)));
    }

    #[test]
    fn rejects_symbols_and_non_ascii() {
        assert_eq!(CouponCode::parse("AB-12C"), Err(CouponCodeError::Characters));
        assert_eq!(CouponCode::parse("ÀB12CD"), Err(CouponCodeError::Characters));
    }

    #[test]
    fn owned_string_conversion_validates() -> TestResult {
        let code = CouponCode::try_from(String::from("SUMMER"))?;

        assert_eq!(String::from(code), "SUMMER");
        assert!(CouponCode::try_from(String::from("summer")).is_err());
        assert!("SUMMER".parse::<CouponCode>().is_ok());

        Ok(())
    }
}
