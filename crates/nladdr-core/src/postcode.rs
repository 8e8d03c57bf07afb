//! Validation and normalization of Dutch postcodes and house numbers.
//!
//! A [`Postcode`] can only be obtained through [`Postcode::parse`], so any
//! value of that type is known to match `[1-9][0-9]{3}[A-Z]{2}`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid postcode \"{0}\": expected 4 digits followed by 2 letters, e.g. 1234 AB")]
    InvalidPostcode(String),

    #[error("house number must not be empty")]
    EmptyHouseNumber,
}

/// A validated Dutch postcode in canonical form (`"1234AB"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Postcode(String);

impl Postcode {
    /// Normalizes and validates a raw postcode.
    ///
    /// All whitespace is removed and ASCII letters are upper-cased before the
    /// shape check, so `"9711 ac"`, `" 9711AC "` and `"9711\tAc"` all yield
    /// `9711AC`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPostcode`] when the normalized value
    /// is not exactly four digits (the first non-zero) followed by two letters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if is_canonical(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::InvalidPostcode(raw.to_string()))
        }
    }

    /// Canonical six-character form without a space.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four-digit part.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0[..4]
    }

    /// The two-letter part.
    #[must_use]
    pub fn letters(&self) -> &str {
        &self.0[4..]
    }

    /// Display form with one separating space (`"1234 AB"`).
    #[must_use]
    pub fn formatted(&self) -> String {
        format!("{} {}", self.digits(), self.letters())
    }
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.digits(), self.letters())
    }
}

impl From<Postcode> for String {
    fn from(value: Postcode) -> Self {
        value.0
    }
}

fn is_canonical(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 6
        && matches!(bytes[0], b'1'..=b'9')
        && bytes[1..4].iter().all(u8::is_ascii_digit)
        && bytes[4..].iter().all(u8::is_ascii_uppercase)
}

/// A house number as entered by the caller.
///
/// Dutch house numbers admit letters and suffixes (`10`, `10A`, `10-2`,
/// `10 bis`), so the value is kept as opaque trimmed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseNumber(String);

impl HouseNumber {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHouseNumber`] when `raw` is blank.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyHouseNumber);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits into the leading numeric part and the remaining addition.
    ///
    /// Separators between the two (`-`, space) are dropped from the
    /// addition: `"10-2"` → `("10", Some("2"))`, `"10A"` → `("10", Some("A"))`.
    /// A value without leading digits is returned whole as the number.
    #[must_use]
    pub fn split(&self) -> (&str, Option<&str>) {
        let digits_end = self
            .0
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.0.len());
        if digits_end == 0 {
            return (&self.0, None);
        }

        let number = &self.0[..digits_end];
        let addition = self.0[digits_end..].trim_start_matches(['-', ' ']).trim();
        (number, (!addition.is_empty()).then_some(addition))
    }
}

impl fmt::Display for HouseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
