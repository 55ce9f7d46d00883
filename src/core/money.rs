//! Monetary values bound to one currency.
//!
//! Construction floors the amount to the currency precision so that a `Money`
//! never claims more precision than the asset has and never rounds up past an
//! available balance. Display rounding is a separate, later concern.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::asset::Currency;
use crate::core::decimal::Amount;
use crate::error::{WalletError, Result};

#[derive(Debug, Clone)]
pub struct Money {
    amount: Amount,
    coins: i64,
    currency: Arc<Currency>,
}

impl Money {
    /// Floors `amount` to the currency precision. Fails when the value in coins does not fit i64.
    pub fn new(amount: Amount, currency: Arc<Currency>) -> Result<Self> {
        let precision = currency.precision();
        let amount = amount.truncate(precision);
        let coins = amount
            .scale_pow10(precision as i32)
            .ok()
            .and_then(|c| c.to_i64())
            .ok_or_else(|| {
                WalletError::validation(format!(
                    "amount {} {} is out of range",
                    amount,
                    currency.short_name()
                ))
            })?;
        Ok(Self {
            amount,
            coins,
            currency,
        })
    }

    pub fn from_tokens(tokens: &str, currency: Arc<Currency>) -> Result<Self> {
        Self::new(tokens.parse()?, currency)
    }

    /// Inverse of `to_coins`.
    pub fn from_coins(coins: i64, currency: Arc<Currency>) -> Self {
        let amount = Amount::from_decimal(Decimal::new(coins, currency.precision()));
        Self {
            amount,
            coins,
            currency,
        }
    }

    pub fn zero(currency: Arc<Currency>) -> Self {
        Self::from_coins(0, currency)
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Arc<Currency> {
        &self.currency
    }

    /// Smallest-unit integer used on the wire: `floor(amount × 10^precision)`
    pub fn to_coins(&self) -> i64 {
        self.coins
    }

    /// Token value re-derived from `to_coins`, so what is shown is exactly what gets signed.
    pub fn to_tokens(&self) -> Amount {
        Amount::from_decimal(Decimal::new(self.coins, self.currency.precision()))
    }

    /// Sum of the exact amounts, floored to the precision of `self`.
    pub fn plus(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        Money::new(self.amount.checked_add(other.amount)?, Arc::clone(&self.currency))
    }

    /// Difference of the exact amounts, floored to the precision of `self`.
    pub fn minus(&self, other: &Money) -> Result<Money> {
        self.ensure_same_currency(other)?;
        Money::new(self.amount.checked_sub(other.amount)?, Arc::clone(&self.currency))
    }

    /// Multiplies by a plain number; the product is floored like any new value.
    pub fn multiply(&self, factor: f64) -> Result<Money> {
        let product = self.amount.multiply_f64(factor)?;
        Money::new(product, Arc::clone(&self.currency))
    }

    pub fn compare(&self, other: &Money) -> Result<Ordering> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn gt(&self, other: &Money) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn gte(&self, other: &Money) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Less)
    }

    pub fn lt(&self, other: &Money) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn lte(&self, other: &Money) -> Result<bool> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    pub fn equals(&self, other: &Money) -> Result<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    pub fn is_zero(&self) -> bool {
        self.coins == 0
    }

    pub fn is_positive(&self) -> bool {
        self.coins > 0
    }

    pub fn is_native(&self) -> bool {
        self.currency.is_native()
    }

    /// Formats the amount with two independent toggles.
    ///
    /// Stripping trailing zeros works from `to_tokens`, not the stored amount,
    /// so no rounding is reintroduced.
    pub fn format_amount(&self, strip_trailing_zeros: bool, thousands_separator: bool) -> String {
        let text = if strip_trailing_zeros {
            self.to_tokens().to_plain_string()
        } else {
            self.amount
                .to_fixed(self.currency.precision(), self.currency.rounding_mode())
        };
        if thousands_separator {
            group_thousands(&text)
        } else {
            text
        }
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<()> {
        if !self.currency.same_asset(&other.currency) {
            return Err(WalletError::CurrencyMismatch {
                left: self.currency.to_string(),
                right: other.currency.to_string(),
            });
        }
        Ok(())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount && self.currency.same_asset(&other.currency)
    }
}

impl Eq for Money {}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_amount(false, false), self.currency.short_name())
    }
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
