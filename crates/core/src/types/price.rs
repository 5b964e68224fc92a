//! Prices stored as integer minor currency units.
//!
//! Catalog rows keep their price in the smallest currency unit (pence for
//! GBP). Tables divide by 100 and format with the currency symbol; the raw
//! value is what gets stored, edited and shown on detail pages.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest decimal exponent accepted when parsing scientific notation.
const MAX_EXPONENT: u64 = 28;

/// Errors produced when parsing a price from form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The input was empty or whitespace.
    #[error("price is empty")]
    Empty,
    /// The input is not numeric.
    #[error("price is not numeric: {0}")]
    NotNumeric(String),
    /// The input is numeric but does not fit the stored integer column.
    #[error("price is out of range: {0}")]
    OutOfRange(String),
}

/// A price in minor currency units (e.g. pence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i32);

impl Price {
    /// Create a price from minor units.
    #[must_use]
    pub const fn from_minor(units: i32) -> Self {
        Self(units)
    }

    /// The stored integer value in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i32 {
        self.0
    }

    /// The price in major units (minor units ÷ 100).
    #[must_use]
    pub fn major(self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }

    /// Format in major units with the currency symbol and thousands
    /// separators, e.g. `£1,234.56` or `-£0.50`.
    #[must_use]
    pub fn format(self, currency: CurrencyCode) -> String {
        let major = format!("{:.2}", self.major().abs());
        let (whole, fraction) = major.split_once('.').unwrap_or((major.as_str(), "00"));
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{sign}{}{}.{fraction}",
            currency.symbol(),
            group_thousands(whole)
        )
    }

    /// Parse form input into a stored price.
    ///
    /// Accepts anything numeric: an optional sign, digits with an optional
    /// fraction, an optional exponent, and surrounding whitespace. Values that
    /// are not whole numbers are rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the input is empty, not numeric, or does not
    /// fit in an `i32`.
    pub fn parse_input(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let (mantissa, exponent) = split_numeric(trimmed)
            .ok_or_else(|| PriceError::NotNumeric(trimmed.to_string()))?;

        let mut value = Decimal::from_str(&mantissa)
            .map_err(|_| PriceError::OutOfRange(trimmed.to_string()))?;

        if exponent.unsigned_abs() > MAX_EXPONENT {
            if exponent > 0 && !value.is_zero() {
                return Err(PriceError::OutOfRange(trimmed.to_string()));
            }
            value = Decimal::ZERO;
        } else {
            for _ in 0..exponent.unsigned_abs() {
                value = if exponent > 0 {
                    value
                        .checked_mul(Decimal::TEN)
                        .ok_or_else(|| PriceError::OutOfRange(trimmed.to_string()))?
                } else {
                    value / Decimal::TEN
                };
            }
        }

        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
            .map(Self)
            .ok_or_else(|| PriceError::OutOfRange(trimmed.to_string()))
    }
}

impl From<i32> for Price {
    fn from(units: i32) -> Self {
        Self(units)
    }
}

impl From<Price> for i32 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    GBP,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Currency symbol used when formatting.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GBP => "£",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }

    /// Upper-case ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GBP => "GBP",
            Self::USD => "USD",
            Self::EUR => "EUR",
        }
    }
}

/// Insert `,` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Split a numeric string into a normalized decimal mantissa and an exponent.
///
/// Returns `None` unless the whole input matches
/// `[+-]?(digits[.digits?] | .digits)([eE][+-]?digits)?`.
fn split_numeric(s: &str) -> Option<(String, i64)> {
    let (body, exponent) = match s.find(['e', 'E']) {
        Some(pos) => {
            let (body, exp) = s.split_at(pos);
            let exp = exp.get(1..)?;
            let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // Saturate absurd exponents; the caller range-checks them.
            let exponent = exp.parse::<i64>().unwrap_or(if exp.starts_with('-') {
                i64::MIN
            } else {
                i64::MAX
            });
            (body, exponent)
        }
        None => (s, 0),
    };

    let (negative, unsigned) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body.strip_prefix('+').unwrap_or(body)),
    };

    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let mut mantissa = String::with_capacity(unsigned.len() + 2);
    if negative {
        mantissa.push('-');
    }
    mantissa.push_str(whole);
    if !fraction.is_empty() {
        mantissa.push('.');
        mantissa.push_str(fraction);
    }
    Some((mantissa, exponent))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_major_divides_by_one_hundred() {
        assert_eq!(Price::from_minor(1999).major(), Decimal::new(1999, 2));
        assert_eq!(Price::from_minor(5).major().to_string(), "0.05");
    }

    #[test]
    fn test_format_gbp() {
        assert_eq!(Price::from_minor(0).format(CurrencyCode::GBP), "£0.00");
        assert_eq!(Price::from_minor(1999).format(CurrencyCode::GBP), "£19.99");
        assert_eq!(Price::from_minor(10_000).format(CurrencyCode::GBP), "£100.00");
        assert_eq!(
            Price::from_minor(123_456_789).format(CurrencyCode::GBP),
            "£1,234,567.89"
        );
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(Price::from_minor(-50).format(CurrencyCode::GBP), "-£0.50");
        assert_eq!(
            Price::from_minor(-123_456).format(CurrencyCode::GBP),
            "-£1,234.56"
        );
    }

    #[test]
    fn test_display_is_raw_minor_units() {
        assert_eq!(Price::from_minor(1999).to_string(), "1999");
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(Price::parse_input("1500").unwrap(), Price::from_minor(1500));
        assert_eq!(Price::parse_input("  42 ").unwrap(), Price::from_minor(42));
        assert_eq!(Price::parse_input("+7").unwrap(), Price::from_minor(7));
        assert_eq!(Price::parse_input("-3").unwrap(), Price::from_minor(-3));
    }

    #[test]
    fn test_parse_decimals_round_half_away_from_zero() {
        assert_eq!(Price::parse_input("12.5").unwrap(), Price::from_minor(13));
        assert_eq!(Price::parse_input("12.49").unwrap(), Price::from_minor(12));
        assert_eq!(Price::parse_input("-2.5").unwrap(), Price::from_minor(-3));
        assert_eq!(Price::parse_input(".5").unwrap(), Price::from_minor(1));
        assert_eq!(Price::parse_input("3.").unwrap(), Price::from_minor(3));
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(Price::parse_input("1e3").unwrap(), Price::from_minor(1000));
        assert_eq!(Price::parse_input("2.5E2").unwrap(), Price::from_minor(250));
        assert_eq!(Price::parse_input("15e-1").unwrap(), Price::from_minor(2));
        assert_eq!(Price::parse_input("1e-99").unwrap(), Price::from_minor(0));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for input in ["abc", "12abc", "1,000", "£10", "1.2.3", ".", "-", "e5", "1e", "0x1A"] {
            assert!(
                matches!(Price::parse_input(input), Err(PriceError::NotNumeric(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Price::parse_input(""), Err(PriceError::Empty));
        assert_eq!(Price::parse_input("   "), Err(PriceError::Empty));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            Price::parse_input("99999999999"),
            Err(PriceError::OutOfRange(_))
        ));
        assert!(matches!(
            Price::parse_input("1e40"),
            Err(PriceError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::GBP);
        assert_eq!(CurrencyCode::GBP.code(), "GBP");
    }
}
