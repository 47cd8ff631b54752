//! Monetary value objects: amounts and interest rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A monetary amount in the smallest currency unit (cents).
///
/// Signed: a checking account may run a negative balance inside its
/// overdraft limit. Displays with exactly two decimal places (`$12.34`).
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units: `Money::from_units(300)` is `$300.00`.
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Addition surfacing overflow as a domain invariant error.
    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("monetary amount overflow"))
    }

    /// Subtraction surfacing overflow as a domain invariant error.
    pub fn checked_sub(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("monetary amount overflow"))
    }

    /// Saturating addition, for event application (overflow is already ruled
    /// out at decision time via the checked operations).
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl ValueObject for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// An interest rate as a fraction in `[0, 1)`, held in whole basis points.
///
/// Stored and displayed only in the current scope; never compounded.
/// Displays as a percentage with two decimal places (`2.00%`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestRate(u32);

impl InterestRate {
    /// 100 basis points = 1%.
    pub fn from_basis_points(basis_points: u32) -> DomainResult<Self> {
        if basis_points >= 10_000 {
            return Err(DomainError::validation(
                "interest rate must be below 100%",
            ));
        }
        Ok(Self(basis_points))
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }
}

impl ValueObject for InterestRate {}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_displays_with_two_decimal_places() {
        assert_eq!(Money::from_cents(150_000).to_string(), "$1500.00");
        assert_eq!(Money::from_cents(1_234).to_string(), "$12.34");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn negative_money_displays_with_leading_sign() {
        assert_eq!(Money::from_cents(-50).to_string(), "-$0.50");
        assert_eq!(Money::from_units(-400).to_string(), "-$400.00");
    }

    #[test]
    fn checked_arithmetic_rejects_overflow() {
        let max = Money::from_cents(i64::MAX);
        assert!(max.checked_add(Money::from_cents(1)).is_err());
        assert_eq!(
            max.checked_sub(Money::from_cents(1)).unwrap(),
            Money::from_cents(i64::MAX - 1)
        );
    }

    #[test]
    fn interest_rate_displays_as_percentage() {
        assert_eq!(
            InterestRate::from_basis_points(200).unwrap().to_string(),
            "2.00%"
        );
        assert_eq!(
            InterestRate::from_basis_points(1_234).unwrap().to_string(),
            "12.34%"
        );
    }

    #[test]
    fn interest_rate_must_stay_below_one() {
        assert!(InterestRate::from_basis_points(9_999).is_ok());
        assert!(matches!(
            InterestRate::from_basis_points(10_000),
            Err(DomainError::Validation(_))
        ));
    }
}
