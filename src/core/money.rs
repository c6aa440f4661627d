use std::cmp;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use serde::{Deserialize, Serialize};

/// Monetary value in minor currency units (cents). Balances and fines are
/// computed in integer cents so arithmetic stays exact; fractional input is
/// rounded half-up once at the conversion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const fn zero() -> Self {
        Money(0)
    }

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    // round-half-up into minor units, e.g. 0.125 -> 13 cents
    pub fn from_major(amount: f64) -> Self {
        let cents = if amount >= 0.0 {
            (amount * 100.0 + 0.5).floor() as i64
        } else {
            -((-amount * 100.0 + 0.5).floor() as i64)
        };
        Money(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn min(self, other: Money) -> Money {
        Money(cmp::min(self.0, other.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::money::Money;

    #[tokio::test]
    async fn test_should_convert_major_with_round_half_up() {
        assert_eq!(25, Money::from_major(0.25).cents());
        assert_eq!(13, Money::from_major(0.125).cents());
        assert_eq!(12, Money::from_major(0.124).cents());
        assert_eq!(-13, Money::from_major(-0.125).cents());
    }

    #[tokio::test]
    async fn test_should_compute_arithmetic_in_cents() {
        let fine = Money::from_major(0.25) * 4;
        assert_eq!(100, fine.cents());
        let mut balance = Money::zero();
        balance += fine;
        balance -= Money::from_cents(40);
        assert_eq!(60, balance.cents());
    }

    #[tokio::test]
    async fn test_should_cap_with_min() {
        let balance = Money::from_cents(60);
        let applied = Money::from_cents(500).min(balance);
        assert_eq!(60, applied.cents());
    }

    #[tokio::test]
    async fn test_should_format_money() {
        assert_eq!("$1.00", Money::from_cents(100).to_string());
        assert_eq!("$0.05", Money::from_cents(5).to_string());
        assert_eq!("-$2.50", Money::from_cents(-250).to_string());
    }
}
