//! Network configuration consumed by identity derivation and encoding.
//!
//! The network code and address version are baked into every address and
//! every alias on the wire. A wrong value is not detectable locally: it just
//! produces addresses and signatures the target ledger rejects.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::asset::CurrencyDescriptor;
use crate::core::decimal::RoundingMode;
use crate::error::{WalletError, Result};

pub const DEFAULT_ADDRESS_VERSION: u8 = 1;
pub const DEFAULT_ALIAS_VERSION: u8 = 2;
/// Nonce prepended to the seed before hashing. Fixed; no rotation exists.
pub const DEFAULT_INITIAL_NONCE: u32 = 0;
pub const MAINNET_CODE: u8 = b'W';

/// Named network presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    pub fn config(self) -> NetworkConfig {
        match self {
            Network::Mainnet => NetworkConfig::mainnet(),
            Network::Testnet => NetworkConfig::testnet(),
            Network::Devnet => NetworkConfig::devnet(),
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(WalletError::Config(format!("unknown network '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Single ASCII byte identifying the chain
    pub network_code: char,
    #[serde(default = "default_address_version")]
    pub address_version: u8,
    #[serde(default = "default_alias_version")]
    pub alias_version: u8,
    #[serde(default)]
    pub initial_nonce: u32,
    #[serde(default = "native_descriptor")]
    pub native_asset: CurrencyDescriptor,
    /// Well-known assets that survive a registry invalidation
    #[serde(default)]
    pub pinned_assets: Vec<CurrencyDescriptor>,
}

fn default_address_version() -> u8 {
    DEFAULT_ADDRESS_VERSION
}

fn default_alias_version() -> u8 {
    DEFAULT_ALIAS_VERSION
}

fn native_descriptor() -> CurrencyDescriptor {
    CurrencyDescriptor {
        id: Some(String::new()),
        display_name: Some("Waves".to_string()),
        short_name: Some("WAVES".to_string()),
        symbol: Some("WAVES".to_string()),
        precision: Some(8),
        verified: Some(true),
        rounding_mode: Some(RoundingMode::HalfUp),
    }
}

fn bridged(id: &str, name: &str, short: &str, symbol: &str, precision: u32) -> CurrencyDescriptor {
    CurrencyDescriptor {
        id: Some(id.to_string()),
        display_name: Some(name.to_string()),
        short_name: Some(short.to_string()),
        symbol: Some(symbol.to_string()),
        precision: Some(precision),
        verified: Some(true),
        rounding_mode: None,
    }
}

impl NetworkConfig {
    fn with_code(network_code: char) -> Self {
        Self {
            network_code,
            address_version: DEFAULT_ADDRESS_VERSION,
            alias_version: DEFAULT_ALIAS_VERSION,
            initial_nonce: DEFAULT_INITIAL_NONCE,
            native_asset: native_descriptor(),
            pinned_assets: Vec::new(),
        }
    }

    pub fn mainnet() -> Self {
        let mut config = Self::with_code(MAINNET_CODE as char);
        config.pinned_assets = vec![
            bridged("8LQW8f7P5d5PZM7GtZEBgaqRPGSzS3DfPuiXrURJ4AJS", "Bitcoin", "BTC", "₿", 8),
            bridged("Ft8X1v1LTa1ABafufpaCWyVj8KkaxUWE6xBhW6sNFJck", "US Dollar", "USD", "$", 2),
            bridged("Gtb1WRznfchDnTh37ezoDTJ4wcoKaRsKqKjJjy7nm2zU", "Euro", "EUR", "€", 2),
            bridged("474jTeYx2r2Va35794tCScAXWJG9hU2HcgxzMowaZUnu", "Ethereum", "ETH", "Ξ", 8),
        ];
        config
    }

    pub fn testnet() -> Self {
        Self::with_code('T')
    }

    pub fn devnet() -> Self {
        Self::with_code('D')
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.network_code.is_ascii() || self.network_code.is_ascii_control() {
            return Err(WalletError::Config(format!(
                "network code must be a printable ASCII character, got {:?}",
                self.network_code
            )));
        }
        if self.address_version == self.alias_version {
            return Err(WalletError::Config(
                "address and alias versions must differ".to_string(),
            ));
        }
        match self.native_asset.id.as_deref() {
            None | Some("") => {}
            Some(id) => {
                return Err(WalletError::Config(format!(
                    "native asset id must be empty, got '{}'",
                    id
                )))
            }
        }
        if self.native_asset.precision.is_none() {
            return Err(WalletError::Config("native asset precision is required".to_string()));
        }
        for pinned in &self.pinned_assets {
            if pinned.id.as_deref().map_or(true, str::is_empty) {
                return Err(WalletError::Config("pinned assets need a non-empty id".to_string()));
            }
        }
        Ok(())
    }

    /// The network code as the byte written on the wire
    pub fn network_byte(&self) -> Result<u8> {
        u8::try_from(self.network_code)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                WalletError::Config(format!(
                    "network code {:?} does not fit one ASCII byte",
                    self.network_code
                ))
            })
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
