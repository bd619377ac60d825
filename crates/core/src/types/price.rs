//! Type-safe price representation.
//!
//! Catalog prices are whole rubles with no minor unit, so `Price` wraps a
//! `u64` rather than a decimal type. All arithmetic stays in integer space;
//! the one place a fraction appears (percentage discounts) rounds half up.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// A non-negative amount of whole rubles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-ruble amount.
    #[must_use]
    pub const fn new(rubles: u64) -> Self {
        Self(rubles)
    }

    /// Get the underlying ruble amount.
    #[must_use]
    pub const fn rubles(&self) -> u64 {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Subtract, saturating at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Compute `percent`% of this price, rounded to the nearest ruble.
    ///
    /// Exact halves round up: `percent_of(1, 50)` is 1 ruble, not 0. This is
    /// the documented tie-break for the cart discount.
    #[must_use]
    pub const fn percent_of(self, percent: u64) -> Self {
        Self((self.0 * percent + 50) / 100)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ₽", self.0)
    }
}

impl From<u64> for Price {
    fn from(rubles: u64) -> Self {
        Self(rubles)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(299), Price::new(199), Price::new(149)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(647));
    }

    #[test]
    fn test_sum_empty() {
        let total: Price = std::iter::empty::<Price>().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(
            Price::new(100).saturating_sub(Price::new(30)),
            Price::new(70)
        );
        assert_eq!(Price::new(30).saturating_sub(Price::new(100)), Price::ZERO);
    }

    #[test]
    fn test_percent_of_exact() {
        assert_eq!(Price::new(1000).percent_of(15), Price::new(150));
    }

    #[test]
    fn test_percent_of_rounds_to_nearest() {
        // 15% of 333 = 49.95 -> 50
        assert_eq!(Price::new(333).percent_of(15), Price::new(50));
        // 15% of 334 = 50.1 -> 50
        assert_eq!(Price::new(334).percent_of(15), Price::new(50));
    }

    #[test]
    fn test_percent_of_half_rounds_up() {
        // 50% of 1 = 0.5 -> 1
        assert_eq!(Price::new(1).percent_of(50), Price::new(1));
        // 15% of 330 = 49.5 -> 50
        assert_eq!(Price::new(330).percent_of(15), Price::new(50));
    }

    #[test]
    fn test_percent_of_zero() {
        assert_eq!(Price::ZERO.percent_of(15), Price::ZERO);
        assert_eq!(Price::new(1000).percent_of(0), Price::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Price::new(599)), "599 ₽");
    }
}
