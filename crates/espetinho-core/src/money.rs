//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The legacy panel stored prices as REAL:                                │
//! │    3 × 12.10 = 36.300000000000004  ❌                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    3 × 1210 cents = 3630 cents  ✅                                      │
//! │                                                                         │
//! │  Decimals only exist at the JSON boundary (try_from_decimal)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use espetinho_core::money::Money;
//!
//! let skewer = Money::from_cents(1250); // R$ 12,50
//! let order = skewer * 2 + Money::from_cents(600);
//! assert_eq!(order.cents(), 3100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Largest cent count accepted from a decimal amount (2^53, the last
/// integer an `f64` holds exactly).
pub const MAX_DECIMAL_CENTS: i64 = 1 << 53;

/// A monetary value in centavos (the smallest BRL unit).
///
/// ## Where Money is Used
/// ```text
/// Product.unit_price_cents ──► OrderItem.unit_price_cents (snapshot)
///                                      │
///                                      ▼
///                          Order.total_cents ──► Statistics.revenue
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use espetinho_core::money::Money;
    ///
    /// let price = Money::from_cents(1250);
    /// assert_eq!(price.cents(), 1250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount (as received in JSON) to cents.
    ///
    /// Rounds half away from zero, so `0.125` becomes 13 cents. Returns
    /// `None` for NaN, infinities and amounts beyond `MAX_DECIMAL_CENTS`.
    /// Only the API boundary should call this; everything past it works
    /// in cents.
    ///
    /// ```rust
    /// use espetinho_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_decimal(12.5).unwrap().cents(), 1250);
    /// assert_eq!(Money::try_from_decimal(0.1 + 0.2).unwrap().cents(), 30);
    /// assert!(Money::try_from_decimal(f64::INFINITY).is_none());
    /// ```
    pub fn try_from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_DECIMAL_CENTS as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value as a decimal amount for JSON responses.
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole reais portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use espetinho_core::money::Money;
    ///
    /// let line_total = Money::from_cents(1250).multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 3750);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two values, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian notation, used in log lines and order summaries.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            self.reais().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_try_from_decimal_rounds() {
        let cents = |amount: f64| Money::try_from_decimal(amount).unwrap().cents();
        assert_eq!(cents(12.50), 1250);
        assert_eq!(cents(15.0), 1500);
        assert_eq!(cents(0.125), 13);
        assert_eq!(cents(-3.5), -350);
        // 36.300000000000004 must not leak a stray centavo
        assert_eq!(cents(3.0 * 12.10), 3630);
    }

    #[test]
    fn test_try_from_decimal_rejects_unrepresentable() {
        assert!(Money::try_from_decimal(f64::INFINITY).is_none());
        assert!(Money::try_from_decimal(f64::NEG_INFINITY).is_none());
        assert!(Money::try_from_decimal(f64::NAN).is_none());
        assert!(Money::try_from_decimal(1e300).is_none());
        assert!(Money::try_from_decimal(-1e300).is_none());
        assert!(Money::try_from_decimal(1e13).is_some());
        assert!(Money::try_from_decimal(1e14).is_none());
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_cents(1250);
        assert_eq!(price.checked_multiply_quantity(3), Some(Money::from_cents(3750)));
        assert_eq!(price.checked_multiply_quantity(4_611_686_018_427_387_903), None);
        assert_eq!(price.checked_add(price), Some(Money::from_cents(2500)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(price), None);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(1250).to_decimal(), 12.5);
        assert_eq!(Money::zero().to_decimal(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1250)), "R$ 12,50");
        assert_eq!(format!("{}", Money::from_cents(500)), "R$ 5,00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-R$ 5,50");
        assert_eq!(format!("{}", Money::zero()), "R$ 0,00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut total = Money::zero();
        total += a;
        assert_eq!(total, a);
    }

    #[test]
    fn test_sum() {
        let total: Money = [1250, 1250, 600]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 3100);
    }

    #[test]
    fn test_serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "1250");
    }
}
