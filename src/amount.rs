//! Fixed-point dollar amounts with 2 decimal places.
//!
//! Uses `rust_decimal` internally with scale enforcement so that control
//! totals are summed without floating-point drift and always render as a
//! whole number of cents.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A dollar amount that maintains exactly 2 decimal places.
///
/// Numeric amount fields in an ACH record carry two implied decimal digits,
/// so `Amount` is rendered with [`Amount::to_cents`] rather than `Display`.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use ach_file::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// assert_eq!(amount.to_cents(), "1050");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount`, rounding half away from zero to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Creates an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Amount(Decimal::new(cents, Self::SCALE))
    }

    /// Renders the amount as an integer number of cents with the decimal
    /// point removed: `1000.00` becomes `"100000"`.
    pub fn to_cents(&self) -> String {
        // Scale is pinned at 2, so the mantissa is the cent count.
        self.0.mantissa().to_string()
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Amount::new(decimal))
    }
}

/// CSV and other text sources hand amounts over as dollar strings.
impl TryFrom<String> for Amount {
    type Error = rust_decimal::Error;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Amount::from_str(&value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        assert_eq!(Amount::from_str("1").unwrap().to_string(), "1.00");
        assert_eq!(Amount::from_str("1.5").unwrap().to_string(), "1.50");
        assert_eq!(Amount::from_str("  2.25  ").unwrap().to_string(), "2.25");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(Amount::from_str("1.005").unwrap().to_string(), "1.01");
        assert_eq!(Amount::from_str("1.004").unwrap().to_string(), "1.00");
    }

    #[test]
    fn test_to_cents_drops_decimal_point() {
        assert_eq!(Amount::from_str("1000").unwrap().to_cents(), "100000");
        assert_eq!(Amount::from_str("10.5").unwrap().to_cents(), "1050");
        assert_eq!(Amount::ZERO.to_cents(), "0");
        assert_eq!(Amount::from_cents(7).to_cents(), "7");
    }

    #[test]
    fn test_arithmetic_preserves_scale() {
        let a = Amount::from_str("1.5").unwrap();
        let b = Amount::from_str("2.5").unwrap();
        assert_eq!((a + b).to_string(), "4.00");

        let mut c = a;
        c += b;
        assert_eq!(c.to_cents(), "400");
    }

    #[test]
    fn test_sum() {
        let total: Amount = ["1.10", "2.20", "3.30"]
            .iter()
            .map(|s| Amount::from_str(s).unwrap())
            .sum();
        assert_eq!(total.to_string(), "6.60");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Amount::from_str("ten").is_err());
        assert!(Amount::try_from(String::new()).is_err());
    }
}
