//! Exact base-10 amounts. Every value is a `rust_decimal::Decimal`; nothing is
//! ever routed through binary floating point, including `f64` inputs, which are
//! converted through their shortest round-trip decimal text.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{WalletError, Result};

/// Largest power of ten a `Decimal` can represent as a scale or value
pub const MAX_EXPONENT: u32 = 28;

/// Policy applied when an amount is rendered with fewer fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Toward zero
    Down,
    /// Toward positive infinity
    Ceil,
    /// Toward negative infinity
    Floor,
    #[default]
    HalfUp,
    HalfDown,
    HalfEven,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceil => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);
    pub const ONE: Amount = Amount(Decimal::ONE);

    pub fn from_decimal(value: Decimal) -> Self {
        Amount(value)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Converts a float through its shortest decimal representation.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(WalletError::Parse(format!("{} is not a finite number", value)));
        }
        // `Display` for f64 is the shortest round-trip text and never exponential.
        format!("{}", value).parse()
    }

    /// `10^exp` for `-28 <= exp <= 28`
    pub fn pow10(exp: i32) -> Result<Self> {
        if exp.unsigned_abs() > MAX_EXPONENT {
            return Err(WalletError::Argument(format!(
                "power of ten out of range: 10^{}",
                exp
            )));
        }
        let value = if exp >= 0 {
            Decimal::from_i128_with_scale(10i128.pow(exp as u32), 0)
        } else {
            Decimal::new(1, exp.unsigned_abs())
        };
        Ok(Amount(value))
    }

    /// Floors to `digits` fractional digits (toward negative infinity).
    pub fn truncate(&self, digits: u32) -> Amount {
        self.round(digits, RoundingMode::Floor)
    }

    pub fn round(&self, digits: u32, mode: RoundingMode) -> Amount {
        let mut rounded = self.0.round_dp_with_strategy(digits, mode.strategy());
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Amount(rounded)
    }

    /// Renders exactly `digits` fractional digits, never in exponential form.
    /// Digits past the 28 a `Decimal` can hold are rendered as zeros.
    pub fn to_fixed(&self, digits: u32, mode: RoundingMode) -> String {
        let scale = digits.min(MAX_EXPONENT);
        let mut rounded = self.round(scale, mode).0;
        rounded.rescale(scale);
        let mut text = rounded.to_string();
        if digits > scale {
            text.extend(std::iter::repeat('0').take((digits - scale) as usize));
        }
        text
    }

    /// Plain decimal text without trailing fractional zeros
    pub fn to_plain_string(&self) -> String {
        self.0.normalize().to_string()
    }

    pub fn checked_add(&self, other: Amount) -> Result<Amount> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or_else(|| overflow("addition"))
    }

    pub fn checked_sub(&self, other: Amount) -> Result<Amount> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or_else(|| overflow("subtraction"))
    }

    pub fn checked_mul(&self, other: Amount) -> Result<Amount> {
        self.0
            .checked_mul(other.0)
            .map(Amount)
            .ok_or_else(|| overflow("multiplication"))
    }

    /// Multiplies by a plain number. NaN and infinities are rejected.
    pub fn multiply_f64(&self, factor: f64) -> Result<Amount> {
        if !factor.is_finite() {
            return Err(WalletError::Argument(format!(
                "multiplier must be a finite number, got {}",
                factor
            )));
        }
        let factor = Amount::from_f64(factor)
            .map_err(|e| WalletError::Argument(e.to_string()))?;
        self.checked_mul(factor)
    }

    /// Multiplies by `10^exp`; `exp` may be negative.
    pub fn scale_pow10(&self, exp: i32) -> Result<Amount> {
        self.checked_mul(Amount::pow10(exp)?)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Integer value, if the amount has no fractional part and fits in i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.0.to_i64()
    }
}

fn overflow(op: &str) -> WalletError {
    WalletError::Argument(format!("decimal overflow in {}", op))
}

/// Checks `[+-]?digits[.digits]([eE][+-]?digits)?` and returns the number of
/// fractional digits the value needs once the exponent is applied.
fn scan_number(text: &str) -> Option<i64> {
    fn digits(s: &str) -> Option<usize> {
        let count = s.bytes().take_while(u8::is_ascii_digit).count();
        (count > 0).then_some(count)
    }

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if digits(integer)? != integer.len() {
        return None;
    }
    if mantissa.contains('.') && digits(fraction)? != fraction.len() {
        return None;
    }
    let exponent = match exponent {
        Some(e) => {
            let unsigned_exp = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits(unsigned_exp)? != unsigned_exp.len() {
                return None;
            }
            e.parse::<i64>().unwrap_or(i64::MAX)
        }
        None => 0,
    };
    Some((fraction.len() as i64).saturating_sub(exponent))
}

impl FromStr for Amount {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.is_empty() {
            return Err(WalletError::Parse("empty numeric input".to_string()));
        }
        let scale = scan_number(text)
            .ok_or_else(|| WalletError::Parse(format!("'{}' is not a number", text)))?;
        if scale > MAX_EXPONENT as i64 {
            return Err(WalletError::Parse(format!(
                "'{}' has more than {} fractional digits",
                text, MAX_EXPONENT
            )));
        }
        let unsigned = text.strip_prefix('+').unwrap_or(text);
        let parsed = if unsigned.contains(['e', 'E']) {
            Decimal::from_scientific(unsigned)
        } else {
            Decimal::from_str(unsigned)
        };
        parsed
            .map(Amount)
            .map_err(|e| WalletError::Parse(format!("'{}' is not a number: {}", text, e)))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
