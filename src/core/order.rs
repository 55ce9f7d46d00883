//! Limit orders and cancellations for the order-matching service.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::core::encoder::{asset_id_bytes, ByteWriter, ASSET_ID_LENGTH};
use crate::core::money::Money;
use crate::core::order_price::{AssetPair, OrderPrice};
use crate::core::transaction::{native, positive, require};
use crate::error::{WalletError, Result};
use crate::utils::{base58_decode_fixed, base58_encode, ensure_safe_long};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// Expiration used when the request names none
pub const DEFAULT_ORDER_LIFETIME_MS: i64 = 20 * DAY_MS;
pub const MAX_ORDER_LIFETIME_MS: i64 = 30 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_byte(self) -> u8 {
        match self {
            OrderType::Buy => 0,
            OrderType::Sell => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Buy => "buy",
            OrderType::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(OrderType::Buy),
            "sell" => Ok(OrderType::Sell),
            other => Err(WalletError::Parse(format!("unknown order type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    /// Base58 public key of the matcher
    pub matcher_public_key: Option<String>,
    pub order_type: Option<OrderType>,
    /// Price; its pair is the order's pair
    pub price: Option<OrderPrice>,
    /// In the pair's amount asset
    pub amount: Option<Money>,
    pub matcher_fee: Option<Money>,
    pub timestamp: Option<i64>,
    /// Defaults to `timestamp + 20 days`
    pub expiration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub sender_public_key: [u8; 32],
    pub matcher_public_key: [u8; 32],
    pub order_type: OrderType,
    pub price: OrderPrice,
    pub amount: Money,
    pub matcher_fee: Money,
    pub timestamp: i64,
    pub expiration: i64,
    amount_asset_id: Option<[u8; ASSET_ID_LENGTH]>,
    price_asset_id: Option<[u8; ASSET_ID_LENGTH]>,
}

impl OrderRequest {
    pub fn build(self, sender_public_key: [u8; 32], now: i64) -> Result<Order> {
        let matcher = require(self.matcher_public_key, "matcher public key")?;
        let matcher_public_key = base58_decode_fixed(&matcher, "matcher public key")
            .map_err(|e| WalletError::validation(e.to_string()))?;
        let order_type = require(self.order_type, "order type")?;

        let price = require(self.price, "price")?;
        if !price.is_positive() {
            return Err(WalletError::validation("price must be positive"));
        }
        ensure_safe_long(price.to_backend_price(), "price")?;

        let pair = price.pair();
        let amount = positive(self.amount, "amount")?;
        if !amount.currency().same_asset(pair.amount_asset()) {
            return Err(WalletError::CurrencyMismatch {
                left: pair.amount_asset().to_string(),
                right: amount.currency().to_string(),
            });
        }
        let amount_asset_id = asset_id_bytes(pair.amount_asset())?;
        let price_asset_id = asset_id_bytes(pair.price_asset())?;
        let matcher_fee = native(self.matcher_fee, "matcher fee")?;

        let timestamp = self.timestamp.unwrap_or(now);
        if timestamp <= 0 {
            return Err(WalletError::validation("timestamp must be positive"));
        }
        ensure_safe_long(timestamp, "timestamp")?;
        let expiration = self
            .expiration
            .unwrap_or(timestamp + DEFAULT_ORDER_LIFETIME_MS);
        if expiration <= timestamp {
            return Err(WalletError::validation("expiration must be after the timestamp"));
        }
        if expiration - timestamp > MAX_ORDER_LIFETIME_MS {
            return Err(WalletError::validation("expiration must be at most 30 days ahead"));
        }
        ensure_safe_long(expiration, "expiration")?;

        Ok(Order {
            sender_public_key,
            matcher_public_key,
            order_type,
            price,
            amount,
            matcher_fee,
            timestamp,
            expiration,
            amount_asset_id,
            price_asset_id,
        })
    }
}

impl Order {
    pub fn pair(&self) -> &AssetPair {
        self.price.pair()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.public_key(&self.sender_public_key)
            .public_key(&self.matcher_public_key)
            .optional_asset_id(self.amount_asset_id.as_ref())
            .optional_asset_id(self.price_asset_id.as_ref())
            .byte(self.order_type.as_byte())
            .long(self.price.to_backend_price())
            .long(self.amount.to_coins())
            .long(self.timestamp)
            .long(self.expiration)
            .long(self.matcher_fee.to_coins());
        w.into_vec()
    }

    /// Matcher payload; `price` is the backend integer.
    pub fn to_json(&self, id: &str, signature: &str) -> Value {
        json!({
            "id": id,
            "senderPublicKey": base58_encode(&self.sender_public_key),
            "matcherPublicKey": base58_encode(&self.matcher_public_key),
            "assetPair": self.pair().to_json(),
            "orderType": self.order_type.as_str(),
            "price": self.price.to_backend_price(),
            "amount": self.amount.to_coins(),
            "timestamp": self.timestamp,
            "expiration": self.expiration,
            "matcherFee": self.matcher_fee.to_coins(),
            "signature": signature,
        })
    }
}

/// Request to cancel a resting order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrder {
    pub sender_public_key: [u8; 32],
    pub order_id: [u8; 32],
}

impl CancelOrder {
    pub fn new(sender_public_key: [u8; 32], order_id: &str) -> Result<Self> {
        let order_id = base58_decode_fixed(order_id, "order id")
            .map_err(|e| WalletError::validation(e.to_string()))?;
        Ok(Self {
            sender_public_key,
            order_id,
        })
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.public_key(&self.sender_public_key).raw(&self.order_id);
        w.into_vec()
    }

    pub fn to_json(&self, signature: &str) -> Value {
        json!({
            "sender": base58_encode(&self.sender_public_key),
            "orderId": base58_encode(&self.order_id),
            "signature": signature,
        })
    }
}
