use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::{FinanceError, Result};

/// Exact decimal currency amount. Interior arithmetic keeps full decimal
/// precision; cents is the canonical precision at the boundary (parsing,
/// formatting, persisted values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal, keeping full precision
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// parse a currency literal: optional sign, optional `$`, optional
    /// thousands separators (`-$1,250,000.50`)
    pub fn from_str_exact(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let bare = unsigned.strip_prefix('$').unwrap_or(unsigned);
        let cleaned = bare.replace(',', "");
        let parsed = Decimal::from_str(&cleaned).map_err(|_| FinanceError::ParseMoney {
            input: s.to_string(),
        })?;
        Ok(Money(if negative { -parsed } else { parsed }))
    }

    /// create from whole currency units (dollars)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from cents
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// round to the canonical cents precision
    pub fn round_cents(&self) -> Self {
        self.round_dp(2)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// check if strictly negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.0.round_dp(2);
        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        let plain = format!("{:.2}", cents.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some(parts) => parts,
            None => (plain.as_str(), "00"),
        };
        write!(f, "{}${}.{}", sign, group_thousands(int_part), frac_part)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl FromStr for Money {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i64> for Money {
    fn from(i: i64) -> Self {
        Money::from_major(i)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

// Money * Money is deliberately not implemented: the unit mismatch is
// rejected by the type system, only unitless scalars scale an amount.
impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, scalar: Decimal) -> Money {
        Money(self.0 * scalar)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, scalar: Decimal) -> Money {
        Money(self.0 / scalar)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

/// Rate stored as a plain percentage: `4.5` means 4.5%. The fractional
/// accessor always agrees with the stored value (`fraction == value / 100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);

    /// create from a percentage value (e.g., 4.5 for 4.5%)
    pub fn new(value: Decimal) -> Self {
        Percentage(value)
    }

    /// create from whole percentage points (e.g., 5 for 5%)
    pub fn from_percentage(points: i64) -> Self {
        Percentage(Decimal::from(points))
    }

    /// create from a fraction of 1 (e.g., 0.045 for 4.5%)
    pub fn from_fraction(fraction: Decimal) -> Self {
        Percentage(fraction * dec!(100))
    }

    /// parse a percentage literal with an optional `%` suffix
    pub fn from_str_exact(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let bare = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        let parsed = Decimal::from_str(bare).map_err(|_| FinanceError::ParsePercentage {
            input: s.to_string(),
        })?;
        Ok(Percentage(parsed))
    }

    /// the stored percentage value (4.5 for 4.5%)
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// as a fraction of 1 (0.045 for 4.5%)
    pub fn fraction(&self) -> Decimal {
        self.0 / dec!(100)
    }

    /// monthly rate as a fraction of 1 (annual / 12 / 100)
    pub fn monthly_fraction(&self) -> Decimal {
        self.fraction() / dec!(12)
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if strictly negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0.round_dp(2))
    }
}

impl FromStr for Percentage {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self> {
        Percentage::from_str_exact(s)
    }
}

impl From<Decimal> for Percentage {
    fn from(d: Decimal) -> Self {
        Percentage::new(d)
    }
}

impl Add for Percentage {
    type Output = Percentage;

    fn add(self, other: Percentage) -> Percentage {
        Percentage(self.0 + other.0)
    }
}

impl Sub for Percentage {
    type Output = Percentage;

    fn sub(self, other: Percentage) -> Percentage {
        Percentage(self.0 - other.0)
    }
}

impl Mul<Decimal> for Percentage {
    type Output = Percentage;

    fn mul(self, scalar: Decimal) -> Percentage {
        Percentage(self.0 * scalar)
    }
}
