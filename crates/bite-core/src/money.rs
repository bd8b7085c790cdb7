//! # Money Module
//!
//! Provides the `Money` type for handling menu prices and order totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    9.99 * 3 = 29.970000000000002  ❌ WRONG!                             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    999 cents * 3 = 2997 cents = $29.97                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bite_core::money::Money;
//!
//! let price = Money::from_cents(999); // $9.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.to_string(), "$29.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// Serialized as a bare integer, so a persisted cart stores `"price": 999`.
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.price ──► CartEntry::line_total ──► Cart.total_amount
///                                                     │
///                         OrderTotals { subtotal, delivery_fee, tax, total }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bite_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half up to the cent.
    ///
    /// Integer math: `(amount * bps + 5000) / 10000`.
    ///
    /// ```rust
    /// use bite_core::money::Money;
    /// use bite_core::types::TaxRate;
    ///
    /// // $29.97 at 8% = $2.3976 → $2.40
    /// let tax = Money::from_cents(2997).calculate_tax(TaxRate::from_bps(800));
    /// assert_eq!(tax.cents(), 240);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing mid-calculation
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies a unit price by a quantity, saturating at the i64 bounds.
    ///
    /// ```rust
    /// use bite_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Like [`multiply_quantity`](Self::multiply_quantity), `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, `None` on overflow.
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

/// Shows money as `$12.34` (debugging and the terminal shell).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// Summing line totals into a cart total.
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_cents(5_000_000_000_000_000_000);

        assert_eq!(huge.multiply_quantity(2), Money::from_cents(i64::MAX));
        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(huge + huge, Money::from_cents(i64::MAX));
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(
            Money::from_cents(299).checked_add(Money::from_cents(1)),
            Some(Money::from_cents(300))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(999)), "$9.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_sum_of_line_totals() {
        let total: Money = [999, 1299, 450].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 2748);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_tax_at_eight_percent() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(Money::from_cents(1000).calculate_tax(rate).cents(), 80);
        // 9.99 * 0.08 = 0.7992 → 0.80
        assert_eq!(Money::from_cents(999).calculate_tax(rate).cents(), 80);
        // 7 cents * 8% = 0.56 cent → 1 cent
        assert_eq!(Money::from_cents(7).calculate_tax(rate).cents(), 1);
        assert_eq!(Money::from_cents(6).calculate_tax(rate).cents(), 0);
    }

    #[test]
    fn test_multiply_quantity_and_add() {
        let mut total = Money::from_cents(999).multiply_quantity(3);
        assert_eq!(total.cents(), 2997);
        total += Money::from_cents(3);
        assert_eq!((total + Money::from_cents(1000)).cents(), 4000);
    }
}
