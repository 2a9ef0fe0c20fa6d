//! Integer money amounts in minor currency units.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the smallest currency unit (e.g., cents for USD).
///
/// `Money` is what the price engine returns. It is signed: when discounts
/// exceed the reference price the resolved price goes below zero, and that
/// value is reported as-is rather than clamped.
///
/// ## Examples
///
/// ```
/// use dealfinder_core::Money;
///
/// let price = Money::new(1999);
/// assert_eq!(price.minor(), 1999);
/// assert!(!price.is_zero());
/// assert!(Money::new(-50).is_negative());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero in any currency.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Subtract another amount, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// The amount as an exact decimal, still in minor units.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Money {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(Money::ZERO.is_zero());
        assert_eq!(Money::default(), Money::ZERO);
    }

    #[test]
    fn test_negative() {
        assert!(Money::new(-1).is_negative());
        assert!(!Money::new(0).is_negative());
    }

    #[test]
    fn test_checked_sub_overflow() {
        assert_eq!(Money::new(i64::MIN).checked_sub(Money::new(1)), None);
        assert_eq!(
            Money::new(1000).checked_sub(Money::new(250)),
            Some(Money::new(750))
        );
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::new(1234).to_decimal(), Decimal::new(1234, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(-42).to_string(), "-42");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::new(1999)).unwrap();
        assert_eq!(json, "1999");

        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Money::new(1999));
    }
}
