//! Fixed-point money type with 2 decimal places.
//!
//! Uses `rust_decimal` internally with scale enforcement so ledger legs are
//! rendered consistently and always balance exactly.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::{AddAssign, Neg};
use std::str::FromStr;

/// A monetary amount that always carries exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use petty_cash_iif::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// assert_eq!((-amount).to_string(), "-10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates a new `Amount`, rounding half away from zero to 2 places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Returns the absolute value.
    pub fn abs(self) -> Self {
        Amount(self.0.abs())
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal =
            Decimal::from_str(trimmed).or_else(|e| Decimal::from_scientific(trimmed).map_err(|_| e))?;
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        // Keep zero unsigned so it never renders as "-0.00".
        if self.0.is_zero() {
            return Amount::ZERO;
        }
        Amount(-self.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
        self.0.rescale(Self::SCALE);
    }
}
