use crate::error::{BillPayError, Result};
use alloy_primitives::U256;
use std::fmt;
use std::ops::Add;

/// Number of implied decimal places of the payment token.
pub const TOKEN_DECIMALS: u32 = 18;

/// Number of fractional digits shown to the user.
pub const DISPLAY_PRECISION: u32 = 2;

/// A token quantity in the token's smallest unit.
///
/// This is a wrapper around `alloy_primitives::U256` so the on-chain integer never gets mixed
/// up with the human-readable decimal the user types or reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    /// Scales a display-unit decimal string (e.g. `"10.5"`) up to the smallest unit.
    ///
    /// Accepts plain digits with at most one `.`; the scaling is exact over the whole `U256`
    /// range. Fails for signs, exponents, separators, more fractional digits than the token has
    /// decimals, or a result that does not fit.
    pub fn from_display(input: &str, decimals: u32) -> Result<Self> {
        let invalid = || BillPayError::InvalidAmount(input.to_string());

        let trimmed = input.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if trimmed.ends_with('.') || fraction.len() > decimals as usize {
            return Err(invalid());
        }

        let digits = format!(
            "{}{:0<width$}",
            whole,
            fraction,
            width = decimals as usize
        );
        U256::from_str_radix(&digits, 10)
            .map(Self)
            .map_err(|_| invalid())
    }

    /// Scales down to display units, rounding half-up to `precision` fractional digits.
    pub fn to_display(&self, decimals: u32, precision: u32) -> String {
        let precision = precision.min(decimals);
        let divisor = ten_pow(decimals - precision);
        let half = divisor / U256::from(2u64);
        let rounded = self.0.saturating_add(half) / divisor;

        if precision == 0 {
            return rounded.to_string();
        }

        let unit = ten_pow(precision);
        let whole = rounded / unit;
        let fraction = (rounded % unit).to_string();
        format!(
            "{}.{:0>width$}",
            whole,
            fraction,
            width = precision as usize
        )
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }
}

fn ten_pow(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(U256::from(raw))
    }
}

impl Add for TokenAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// Prints the raw smallest-unit integer, the form the contract ABI takes.
impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
