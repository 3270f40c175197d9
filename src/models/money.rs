//! Amount type for representing currency values
//!
//! Expenses are split evenly across a group, so shares are rarely whole
//! cents. Amounts are therefore carried as `f64` through the computation and
//! only snapped to cents (`round_cents`) where a decision depends on them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};

/// Smallest currency unit the ledger distinguishes
pub const CENT: f64 = 0.01;

/// A signed monetary amount in major currency units (e.g. `12.5` = 12.50)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a major-unit value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create an amount from minor units (cents)
    ///
    /// # Examples
    /// ```
    /// use splitledger::models::Amount;
    /// assert_eq!(Amount::from_cents(1050), Amount::new(10.5));
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(cents as f64 / 100.0)
    }

    /// A zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Round to 2 fractional digits, half away from zero
    pub fn round_cents(&self) -> Self {
        let rounded = (self.0 * 100.0).round() / 100.0;
        // collapse -0.0 so it neither prints nor classifies as negative
        if rounded == 0.0 {
            Self(0.0)
        } else {
            Self(rounded)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The smaller of two amounts
    pub fn min(self, other: Self) -> Self {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// Parse an amount from user input
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "10"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);

        if rest.is_empty() || rest.starts_with(['-', '+']) {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        let value: f64 = rest
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(s.to_string()))?;
        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol placed after the sign
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_cents();
        if rounded.is_negative() {
            format!("-{}{:.2}", symbol, rounded.0.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.0)
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_cents().0)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Even split across `n` participants
impl Div<usize> for Amount {
    type Output = Self;

    fn div(self, n: usize) -> Self {
        Self(self.0 / n as f64)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + *a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
