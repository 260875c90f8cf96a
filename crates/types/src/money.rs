//! Fixed-point monetary types and share quantities.
//!
//! Prices and cash balances are stored as scaled integers to keep
//! accounting exact; statistical values (returns, percentages) stay `f64`.

use derive_more::{Add, AddAssign, From, Into, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

// =============================================================================
// Constants
// =============================================================================

/// Fixed-point scale for Price and Cash types.
/// 10,000 = $1.00, 15,000 = $1.50, 100 = $0.01
pub const PRICE_SCALE: i64 = 10_000;

// =============================================================================
// Quantity
// =============================================================================

/// Number of shares (newtype for type safety).
///
/// Quantities are whole shares by construction; fractional or negative
/// quantities cannot be represented.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Quantity(pub u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    /// Get raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Check if zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating subtraction.
    #[inline]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Quantity(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Qty({})", self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Allow `quantity == 50` comparisons
impl PartialEq<u64> for Quantity {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Price
// =============================================================================

/// Fixed-point price with 4 decimal places.
///
/// # Examples
/// - `Price(10000)` = $1.00
/// - `Price(15000)` = $1.50
/// - `Price(100)` = $0.01
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    From,
    Into,
)]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Create a Price from a floating-point value.
    #[inline]
    pub fn from_float(v: f64) -> Self {
        Self((v * PRICE_SCALE as f64).round() as i64)
    }

    /// Convert to floating-point for display/calculations.
    #[inline]
    pub fn to_float(self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Check if price is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Price(self.0.abs())
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price(${:.4})", self.to_float())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_float())
    }
}

// =============================================================================
// Cash
// =============================================================================

/// Fixed-point cash/money with 4 decimal places.
///
/// Semantically identical to Price but represents balances and totals.
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Add,
    Sub,
    Neg,
    AddAssign,
    SubAssign,
    Sum,
    From,
    Into,
)]
pub struct Cash(pub i64);

impl Cash {
    pub const ZERO: Cash = Cash(0);

    /// Create Cash from a floating-point value.
    #[inline]
    pub fn from_float(v: f64) -> Self {
        Self((v * PRICE_SCALE as f64).round() as i64)
    }

    /// Convert to floating-point for display/calculations.
    #[inline]
    pub fn to_float(self) -> f64 {
        self.0 as f64 / PRICE_SCALE as f64
    }

    /// Raw internal value.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Check if cash is positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Check if cash is negative.
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Debug for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cash(${:.4})", self.to_float())
    }
}

impl fmt::Display for Cash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.to_float())
    }
}

// =============================================================================
// Price-Quantity Operations
// =============================================================================

impl Mul<Quantity> for Price {
    type Output = Cash;

    /// Multiply price by quantity to get total cash value.
    fn mul(self, qty: Quantity) -> Cash {
        Cash(self.0 * qty.0 as i64)
    }
}

impl Mul<Price> for Quantity {
    type Output = Cash;

    fn mul(self, price: Price) -> Cash {
        Cash(price.0 * self.0 as i64)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_float() {
        assert_eq!(Price::from_float(1.0), Price(10_000));
        assert_eq!(Price::from_float(1.50), Price(15_000));
        assert_eq!(Price::from_float(0.01), Price(100));
        assert_eq!(Price::from_float(100.0), Price(1_000_000));
    }

    #[test]
    fn test_price_to_float() {
        assert!((Price(10_000).to_float() - 1.0).abs() < 1e-10);
        assert!((Price(15_000).to_float() - 1.50).abs() < 1e-10);
        assert!((Price(100).to_float() - 0.01).abs() < 1e-10);
    }

    #[test]
    fn test_price_arithmetic() {
        let p1 = Price::from_float(10.0);
        let p2 = Price::from_float(3.5);

        assert_eq!((p1 + p2).to_float(), 13.5);
        assert_eq!((p1 - p2).to_float(), 6.5);
    }

    #[test]
    fn test_price_quantity_multiplication() {
        let price = Price::from_float(50.0);
        let quantity = Quantity(100);

        let total = price * quantity;
        assert_eq!(total.to_float(), 5000.0);
    }

    #[test]
    fn test_cash_operations() {
        let c1 = Cash::from_float(1000.0);
        let c2 = Cash::from_float(250.0);

        assert_eq!((c1 - c2).to_float(), 750.0);
        assert!(c1.is_positive());
        assert!(!c1.is_negative());
    }

    #[test]
    fn test_quantity_saturating_sub() {
        assert_eq!(Quantity(5).saturating_sub(Quantity(3)), Quantity(2));
        assert_eq!(Quantity(3).saturating_sub(Quantity(5)), Quantity::ZERO);
    }
}
