//! Limit prices for the order-matching service.
//!
//! A price is quoted in the price asset per one unit of the amount asset. On
//! the wire it is `price × 10^(pricePrecision − amountPrecision) × 10^8`; the
//! second factor is a fixed protocol constant, independent of both assets.

use std::fmt;
use std::sync::Arc;

use rust_decimal::RoundingStrategy;
use serde_json::{json, Value};

use crate::core::asset::Currency;
use crate::core::decimal::{Amount, RoundingMode};
use crate::error::{WalletError, Result};

/// Matcher wire scale, `10^8`
pub const MATCHER_PRICE_CONSTANT: i64 = 100_000_000;
const MATCHER_PRICE_EXPONENT: i32 = 8;

#[derive(Debug, Clone)]
pub struct AssetPair {
    amount_asset: Arc<Currency>,
    price_asset: Arc<Currency>,
}

impl AssetPair {
    pub fn new(amount_asset: Arc<Currency>, price_asset: Arc<Currency>) -> Self {
        Self {
            amount_asset,
            price_asset,
        }
    }

    pub fn amount_asset(&self) -> &Arc<Currency> {
        &self.amount_asset
    }

    pub fn price_asset(&self) -> &Arc<Currency> {
        &self.price_asset
    }

    /// Exponent turning a token price into a coin price
    fn precision_shift(&self) -> i32 {
        self.price_asset.precision() as i32 - self.amount_asset.precision() as i32
    }

    /// Matcher JSON form; the native asset is the empty string.
    pub fn to_json(&self) -> Value {
        json!({
            "amountAsset": self.amount_asset.id(),
            "priceAsset": self.price_asset.id(),
        })
    }
}

impl PartialEq for AssetPair {
    fn eq(&self, other: &Self) -> bool {
        self.amount_asset.same_asset(&other.amount_asset)
            && self.price_asset.same_asset(&other.price_asset)
    }
}

impl Eq for AssetPair {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPrice {
    price: Amount,
    coins: Amount,
    backend: i64,
    pair: AssetPair,
}

impl OrderPrice {
    /// Floors the human price to the price asset precision.
    pub fn from_tokens(price: Amount, pair: AssetPair) -> Result<Self> {
        let price = price.truncate(pair.price_asset.precision());
        let (coins, backend) = scale_price(price, &pair).ok_or_else(|| {
            WalletError::validation(format!("order price {} is out of range", price))
        })?;
        Ok(Self {
            price,
            coins,
            backend,
            pair,
        })
    }

    /// Exact inverse of `to_backend_price`.
    pub fn from_backend_price(backend: i64, pair: AssetPair) -> Result<Self> {
        let price = Amount::from(backend)
            .scale_pow10(-MATCHER_PRICE_EXPONENT)?
            .scale_pow10(-pair.precision_shift())?;
        Self::from_tokens(price, pair)
    }

    pub fn to_tokens(&self) -> Amount {
        self.price
    }

    /// `price × 10^(pricePrecision − amountPrecision)`
    pub fn to_coins(&self) -> Amount {
        self.coins
    }

    /// `round(to_coins × 10^8)`
    pub fn to_backend_price(&self) -> i64 {
        self.backend
    }

    pub fn pair(&self) -> &AssetPair {
        &self.pair
    }

    pub fn is_positive(&self) -> bool {
        self.price.is_positive()
    }
}

/// Returns the coin price and the matcher wire integer.
fn scale_price(price: Amount, pair: &AssetPair) -> Option<(Amount, i64)> {
    let coins = price.scale_pow10(pair.precision_shift()).ok()?;
    let scaled = coins.scale_pow10(MATCHER_PRICE_EXPONENT).ok()?;
    let rounded = scaled
        .as_decimal()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let backend = Amount::from_decimal(rounded).to_i64()?;
    Some((coins, backend))
}

impl fmt::Display for OrderPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.price.to_fixed(self.pair.price_asset.precision(), RoundingMode::Floor),
            self.pair.price_asset.short_name(),
            self.pair.amount_asset.short_name()
        )
    }
}
