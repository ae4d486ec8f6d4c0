use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::error::DomainError;

/// Monetary amount in minor currency units (cents, kopecks, dirams)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create from a raw minor-unit value
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Get raw minor-unit value
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Zero value
    pub const fn zero() -> Self {
        Self(0)
    }

    /// True if strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition, returns None on overflow
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction, returns None on underflow
    pub fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse a minor-unit integer ("40000", "-15")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidAmount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, m| acc + m)
    }
}

impl From<i64> for Money {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minor_units() {
        assert_eq!("40000".parse::<Money>().unwrap(), Money(40_000));
        assert_eq!("0".parse::<Money>().unwrap(), Money(0));
        assert_eq!(" 15 ".parse::<Money>().unwrap(), Money(15));
        assert_eq!("-15".parse::<Money>().unwrap(), Money(-15));
    }

    #[test]
    fn reject_non_integer_formats() {
        assert_eq!("".parse::<Money>(), Err(DomainError::InvalidAmount));
        assert_eq!("abc".parse::<Money>(), Err(DomainError::InvalidAmount));
        assert_eq!("1.5".parse::<Money>(), Err(DomainError::InvalidAmount));
    }

    #[test]
    fn display_is_raw_minor_value() {
        assert_eq!(Money(4_000_00).to_string(), "400000");
        assert_eq!(Money(-1).to_string(), "-1");
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Money(1).checked_add(Money(2)), Some(Money(3)));
        assert_eq!(Money(i64::MAX).checked_add(Money(1)), None);
    }

    #[test]
    fn checked_sub_detects_underflow() {
        assert_eq!(Money(10).checked_sub(Money(4)), Some(Money(6)));
        assert_eq!(Money(i64::MIN).checked_sub(Money(1)), None);
    }

    #[test]
    fn positivity() {
        assert!(Money(1).is_positive());
        assert!(!Money(0).is_positive());
        assert!(!Money(-1).is_positive());
    }

    #[test]
    fn sum_of_iterator() {
        let total: Money = [Money(100), Money(200), Money(-50)].into_iter().sum();
        assert_eq!(total, Money(250));

        let empty: Money = std::iter::empty().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }
}
